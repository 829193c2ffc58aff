#![no_main]

use libfuzzer_sys::fuzz_target;
use stylelens::parser;
use stylelens::symbols::ScopeTree;
use stylelens_core::lang::dialect::Dialect;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        for dialect in Dialect::ALL {
            let tree = parser::parse(s, dialect);
            let scopes = ScopeTree::build(&tree);
            let _ = scopes.find_symbols_at_offset(s.len() / 2, None);
        }
    }
});
