#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::IssueKind;
    use crate::tree::NodeRef;

    fn css(source: &str) -> SyntaxTree {
        parse(source, Dialect::Css)
    }

    fn scss(source: &str) -> SyntaxTree {
        parse(source, Dialect::Scss)
    }

    fn less(source: &str) -> SyntaxTree {
        parse(source, Dialect::Less)
    }

    fn kinds(node: NodeRef<'_>) -> Vec<NodeKind> {
        node.children().map(|c| c.kind()).collect()
    }

    fn nth_of_kind(tree: &SyntaxTree, kind: NodeKind, n: usize) -> NodeRef<'_> {
        tree.iter()
            .filter(|node| node.kind() == kind)
            .nth(n)
            .unwrap_or_else(|| panic!("no {kind} #{n} in:\n{}", tree.dump()))
    }

    fn first_of_kind(tree: &SyntaxTree, kind: NodeKind) -> NodeRef<'_> {
        nth_of_kind(tree, kind, 0)
    }

    fn codes(tree: &SyntaxTree) -> Vec<IssueCode> {
        tree.issues().iter().map(|issue| issue.code).collect()
    }

    fn assert_clean(tree: &SyntaxTree) {
        assert!(tree.issues().is_empty(), "unexpected issues:\n{}", tree.dump());
    }

    // ========================================================================
    // Basic structure
    // ========================================================================

    #[test]
    fn test_simple_rule_set() {
        let tree = css(".a { color: red; }");
        assert_clean(&tree);
        let root = tree.root();
        assert_eq!(kinds(root), vec![NodeKind::RuleSet]);

        let rule = first_of_kind(&tree, NodeKind::RuleSet);
        assert_eq!(kinds(rule), vec![NodeKind::Selector, NodeKind::Declarations]);
        assert_eq!(first_of_kind(&tree, NodeKind::Selector).text(), ".a");

        let decl = first_of_kind(&tree, NodeKind::Declaration);
        assert_eq!(kinds(decl), vec![NodeKind::Property, NodeKind::Expression]);
        assert_eq!(first_of_kind(&tree, NodeKind::Property).text(), "color");
        assert_eq!(first_of_kind(&tree, NodeKind::Expression).text(), "red");
    }

    #[test]
    fn test_dump_of_simple_rule() {
        let tree = css(".a { color: red; }");
        insta::assert_snapshot!(tree.dump(), @r#"
        Stylesheet 0..18
          RuleSet 0..18
            Selector 0..2
              SimpleSelector 0..2
                ClassSelector 0..2 ".a"
            Declarations 3..18
              Declaration 5..15
                Property 5..10 "color"
                Expression 12..15
                  Identifier 12..15 "red"
        "#);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        for source in ["", "   \n\t", "/* only a comment */"] {
            let tree = css(source);
            assert_clean(&tree);
            assert_eq!(tree.root().span(), Span::new(0, source.len()));
            assert_eq!(tree.root().child_count(), 0);
        }
    }

    #[test]
    fn test_nested_rule_sets() {
        let tree = css(".a { .b { color: blue; } }");
        assert_clean(&tree);
        let outer = nth_of_kind(&tree, NodeKind::RuleSet, 0);
        let inner = nth_of_kind(&tree, NodeKind::RuleSet, 1);
        let inner_parent = inner.parent().unwrap();
        assert_eq!(inner_parent.kind(), NodeKind::Declarations);
        assert_eq!(inner_parent.parent(), Some(outer));
        assert_eq!(inner.text(), ".b { color: blue; }");
    }

    #[test]
    fn test_important_and_custom_properties() {
        let tree = css(":root { --x: { a: b }; --empty:; color: red !important }");
        assert_clean(&tree);
        let custom = first_of_kind(&tree, NodeKind::CustomPropertyDeclaration);
        assert_eq!(kinds(custom), vec![NodeKind::Property, NodeKind::CustomPropertyValue]);
        assert_eq!(first_of_kind(&tree, NodeKind::CustomPropertyValue).text(), "{ a: b }");
        assert!(nth_of_kind(&tree, NodeKind::CustomPropertyValue, 1).span().is_empty());
        let decl = first_of_kind(&tree, NodeKind::Declaration);
        assert_eq!(kinds(decl), vec![NodeKind::Property, NodeKind::Expression, NodeKind::Prio]);
    }

    #[test]
    fn test_value_terms() {
        let tree = css(".a { b: 1px 50% #fff #zzz \"s\" url(a.png) url(\"b.png\") U+0-7F calc(100% - 2px) 12px/1.5; }");
        assert_clean(&tree);
        let expr = first_of_kind(&tree, NodeKind::Expression);
        let expected = vec![
            NodeKind::NumericValue,
            NodeKind::NumericValue,
            NodeKind::HexColorValue,
            NodeKind::Identifier,
            NodeKind::StringLiteral,
            NodeKind::URILiteral,
            NodeKind::URILiteral,
            NodeKind::UnicodeRange,
            NodeKind::Function,
            NodeKind::BinaryExpression,
        ];
        assert_eq!(kinds(expr), expected);
        let calc = first_of_kind(&tree, NodeKind::Function);
        assert_eq!(kinds(calc), vec![NodeKind::Identifier, NodeKind::FunctionArgument]);
    }

    #[test]
    fn test_comma_separated_values() {
        let tree = css(".a { font-family: Arial, \"Helvetica Neue\", sans-serif; }");
        assert_clean(&tree);
        let expr = first_of_kind(&tree, NodeKind::Expression);
        assert_eq!(expr.child_count(), 3);
    }

    // ========================================================================
    // Selectors
    // ========================================================================

    #[test]
    fn test_selector_parts_and_combinators() {
        let tree = css("a.b#c[d=\"e\" i]:hover::before > p + q ~ r, *|s {}");
        assert_clean(&tree);
        let selector = first_of_kind(&tree, NodeKind::Selector);
        assert_eq!(
            kinds(selector),
            vec![
                NodeKind::SimpleSelector,
                NodeKind::SelectorCombinator,
                NodeKind::SimpleSelector,
                NodeKind::SelectorCombinator,
                NodeKind::SimpleSelector,
                NodeKind::SelectorCombinator,
                NodeKind::SimpleSelector,
            ]
        );
        let compound = first_of_kind(&tree, NodeKind::SimpleSelector);
        assert_eq!(
            kinds(compound),
            vec![
                NodeKind::ElementNameSelector,
                NodeKind::ClassSelector,
                NodeKind::IdSelector,
                NodeKind::AttributeSelector,
                NodeKind::PseudoSelector,
                NodeKind::PseudoSelector,
            ]
        );
        let attribute = first_of_kind(&tree, NodeKind::AttributeSelector);
        assert_eq!(
            kinds(attribute),
            vec![NodeKind::Identifier, NodeKind::Operator, NodeKind::StringLiteral, NodeKind::Identifier]
        );
        assert_eq!(nth_of_kind(&tree, NodeKind::Selector, 1).text(), "*|s");
    }

    #[test]
    fn test_functional_pseudo_classes() {
        let tree = css(":not(.a, .b) {} li:nth-child(2n + 1) {}");
        assert_clean(&tree);
        let not = nth_of_kind(&tree, NodeKind::PseudoSelector, 0);
        assert_eq!(kinds(not), vec![NodeKind::Selector, NodeKind::Selector]);
        let nth = nth_of_kind(&tree, NodeKind::PseudoSelector, 1);
        assert_eq!(kinds(nth), vec![NodeKind::Expression]);
    }

    #[test]
    fn test_unclosed_attribute_selector() {
        let tree = css("a[href { }");
        assert_eq!(codes(&tree), vec![IssueCode::RightSquareBracketExpected]);
        assert_eq!(first_of_kind(&tree, NodeKind::RuleSet).child_count(), 2);
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    #[test]
    fn test_missing_closing_brace_extends_to_eof() {
        let source = ".a { color: red";
        let tree = css(source);
        let issues = tree.issues();
        assert_eq!(issues.len(), 1, "{}", tree.dump());
        assert_eq!(issues[0].code, IssueCode::RightCurlyExpected);
        assert_eq!(issues[0].kind, IssueKind::Syntax);
        assert_eq!(first_of_kind(&tree, NodeKind::RuleSet).span().end, source.len());
        assert_eq!(first_of_kind(&tree, NodeKind::Declarations).span().end, source.len());
    }

    #[test]
    fn test_nested_unclosed_blocks_report_once() {
        let tree = css(".a { .b { color: red");
        assert_eq!(codes(&tree), vec![IssueCode::RightCurlyExpected]);
    }

    #[test]
    fn test_missing_semicolon_recovers_at_next_declaration() {
        let tree = css(".a { color: red width: 1px; height: 2px }");
        assert_eq!(codes(&tree), vec![IssueCode::SemicolonExpected]);
        let block = first_of_kind(&tree, NodeKind::Declarations);
        assert_eq!(kinds(block), vec![NodeKind::Declaration, NodeKind::Declaration]);
        assert_eq!(block.children().nth(1).unwrap().text(), "height: 2px");
    }

    #[test]
    fn test_missing_colon_and_value() {
        assert_eq!(codes(&css(".a { color red; }")), vec![IssueCode::ColonExpected]);
        assert_eq!(codes(&css(".a { color: ; }")), vec![IssueCode::PropertyValueExpected]);
    }

    #[test]
    fn test_stray_closing_brace_at_top_level() {
        let tree = css(".a { color: red; } } .b { }");
        assert_eq!(codes(&tree), vec![IssueCode::RuleOrSelectorExpected]);
        assert_eq!(tree.root().children_of_kind(NodeKind::RuleSet).count(), 2);
    }

    #[test]
    fn test_garbage_statement_is_skipped() {
        let tree = css("!!! ; .b { color: red }");
        assert_eq!(codes(&tree), vec![IssueCode::RuleOrSelectorExpected]);
        assert_eq!(first_of_kind(&tree, NodeKind::RuleSet).text(), ".b { color: red }");
    }

    #[test]
    fn test_unterminated_string_stays_on_its_line() {
        let source = ".a { content: \"abc\n  color: red; }";
        let tree = css(source);
        let lexical: Vec<_> = tree.issues().into_iter().filter(|i| i.kind == IssueKind::Lexical).collect();
        assert_eq!(lexical.len(), 1);
        assert_eq!(lexical[0].code, IssueCode::UnterminatedString);
        let literal = first_of_kind(&tree, NodeKind::StringLiteral);
        assert_eq!(literal.text(), "\"abc");
        // the rest of the document is still parsed: the block closes normally
        assert!(!codes(&tree).contains(&IssueCode::RightCurlyExpected), "{}", tree.dump());
        assert_eq!(first_of_kind(&tree, NodeKind::RuleSet).span().end, source.len());
    }

    #[test]
    fn test_unterminated_interpolated_string_keeps_later_rules() {
        let source = "a { content: \"#{ $x\n}\n.b { c: d; }\n$z: 1;";
        let tree = scss(source);
        let lexical = tree.issues().into_iter().filter(|i| i.kind == IssueKind::Lexical).count();
        assert_eq!(lexical, 1);
        assert_eq!(first_of_kind(&tree, NodeKind::StringLiteral).text(), "\"#{ $x");
        assert_eq!(tree.root().children_of_kind(NodeKind::RuleSet).count(), 2, "{}", tree.dump());
        assert_eq!(first_of_kind(&tree, NodeKind::VariableName).text(), "$z");
    }

    #[test]
    fn test_unterminated_string_at_eof() {
        let source = ".a { content: \"abc";
        let tree = css(source);
        let lexical = tree.issues().into_iter().filter(|i| i.kind == IssueKind::Lexical).count();
        assert_eq!(lexical, 1);
        assert_eq!(first_of_kind(&tree, NodeKind::StringLiteral).span().end, source.len());
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let source = format!(".a {{ b: {}1{}; }}", "(".repeat(5000), ")".repeat(5000));
        let tree = css(&source);
        assert_eq!(tree.root().span().end, source.len());
        assert!(!tree.issues().is_empty());

        let blocks = format!("{}{}", ".a { ".repeat(2000), "}".repeat(2000));
        let tree = css(&blocks);
        assert_eq!(tree.root().span().end, blocks.len());
    }

    #[test]
    fn test_long_operator_chain_stays_shallow() {
        let source = format!(".a {{ b: 1{}; }}", " + 1".repeat(20_000));
        let tree = scss(&source);
        assert_clean(&tree);
        let deepest = tree.iter().map(|node| node.ancestors().count()).max().unwrap_or(0);
        assert!(deepest < 200, "tree depth {deepest}");
    }

    // ========================================================================
    // CSS at-rules
    // ========================================================================

    #[test]
    fn test_media_queries() {
        let tree = css("@media screen and (min-width: 100px), print { .a { color: red } }");
        assert_clean(&tree);
        let media = first_of_kind(&tree, NodeKind::Media);
        assert_eq!(kinds(media), vec![NodeKind::MediaQuery, NodeKind::MediaQuery, NodeKind::Declarations]);
        let query = first_of_kind(&tree, NodeKind::MediaQuery);
        assert_eq!(kinds(query), vec![NodeKind::Identifier, NodeKind::MediaFeature]);
        assert_eq!(first_of_kind(&tree, NodeKind::MediaFeature).text(), "(min-width: 100px)");
        assert_eq!(first_of_kind(&tree, NodeKind::Declarations).children().next().unwrap().kind(), NodeKind::RuleSet);
    }

    #[test]
    fn test_media_range_syntax() {
        let tree = css("@media (400px <= width <= 700px) {}");
        assert_clean(&tree);
        let feature = first_of_kind(&tree, NodeKind::MediaFeature);
        assert_eq!(
            kinds(feature),
            vec![
                NodeKind::NumericValue,
                NodeKind::Operator,
                NodeKind::Identifier,
                NodeKind::Operator,
                NodeKind::NumericValue,
            ]
        );
    }

    #[test]
    fn test_media_without_query() {
        let tree = css("@media { .a {} }");
        assert_eq!(codes(&tree), vec![IssueCode::MediaQueryExpected]);
    }

    #[test]
    fn test_supports() {
        let tree = css("@supports (display: grid) and (not (display: inline-grid)) { .a { display: grid } }");
        assert_clean(&tree);
        let supports = first_of_kind(&tree, NodeKind::Supports);
        assert_eq!(kinds(supports), vec![NodeKind::SupportsCondition, NodeKind::Declarations]);
    }

    #[test]
    fn test_keyframes() {
        let tree = css("@keyframes spin { from { opacity: 0 } 50%, to { opacity: 1 } }");
        assert_clean(&tree);
        let keyframe = first_of_kind(&tree, NodeKind::Keyframe);
        assert_eq!(kinds(keyframe), vec![NodeKind::Identifier, NodeKind::Declarations]);
        let body = keyframe.child_of_kind(NodeKind::Declarations).unwrap();
        assert_eq!(kinds(body), vec![NodeKind::KeyframeSelector, NodeKind::KeyframeSelector]);
        assert_eq!(nth_of_kind(&tree, NodeKind::KeyframeSelector, 1).child_count(), 3);
    }

    #[test]
    fn test_page_and_font_face() {
        let tree = css("@page :first { margin: 1in; @top-left { content: \"x\" } } @font-face { font-family: x; }");
        assert_clean(&tree);
        let page = first_of_kind(&tree, NodeKind::Page);
        assert_eq!(kinds(page), vec![NodeKind::PseudoSelector, NodeKind::Declarations]);
        let body = page.child_of_kind(NodeKind::Declarations).unwrap();
        assert_eq!(kinds(body), vec![NodeKind::Declaration, NodeKind::PageBoxMarginBox]);
        assert_eq!(kinds(first_of_kind(&tree, NodeKind::FontFace)), vec![NodeKind::Declarations]);
    }

    #[test]
    fn test_imports_and_statements() {
        let tree = css(
            "@charset \"utf-8\"; @import url(\"a.css\") screen; @import \"b.css\" layer(base) supports(display: grid); \
             @namespace svg url(http://www.w3.org/2000/svg);",
        );
        assert_clean(&tree);
        assert_eq!(kinds(first_of_kind(&tree, NodeKind::Charset)), vec![NodeKind::StringLiteral]);
        assert_eq!(kinds(nth_of_kind(&tree, NodeKind::Import, 0)), vec![NodeKind::URILiteral, NodeKind::MediaQuery]);
        assert_eq!(
            kinds(nth_of_kind(&tree, NodeKind::Import, 1)),
            vec![NodeKind::StringLiteral, NodeKind::Function, NodeKind::SupportsCondition]
        );
        assert_eq!(kinds(first_of_kind(&tree, NodeKind::Namespace)), vec![NodeKind::Identifier, NodeKind::URILiteral]);
    }

    #[test]
    fn test_layer_and_container() {
        let tree = css("@layer a, b.c; @layer d { .x {} } @container sidebar (min-width: 400px) { .y {} }");
        assert_clean(&tree);
        let layer = nth_of_kind(&tree, NodeKind::Layer, 0);
        assert_eq!(kinds(layer), vec![NodeKind::Identifier, NodeKind::Identifier]);
        assert_eq!(layer.children().nth(1).unwrap().text(), "b.c");
        assert_eq!(kinds(nth_of_kind(&tree, NodeKind::Layer, 1)), vec![NodeKind::Identifier, NodeKind::Declarations]);
        let container = first_of_kind(&tree, NodeKind::Container);
        assert_eq!(
            kinds(container),
            vec![NodeKind::Identifier, NodeKind::MediaCondition, NodeKind::Declarations]
        );
    }

    #[test]
    fn test_unknown_at_rules() {
        let tree = css("@tailwind base; @foo bar(1) { .a {} }");
        assert_clean(&tree);
        let statement = nth_of_kind(&tree, NodeKind::UnknownAtRule, 0);
        assert_eq!(kinds(statement), vec![NodeKind::Identifier, NodeKind::UnknownAtRuleValue]);
        let block = nth_of_kind(&tree, NodeKind::UnknownAtRule, 1);
        assert_eq!(
            kinds(block),
            vec![NodeKind::Identifier, NodeKind::UnknownAtRuleValue, NodeKind::Declarations]
        );
        assert_eq!(nth_of_kind(&tree, NodeKind::UnknownAtRuleValue, 1).text(), "bar(1)");
    }

    #[test]
    fn test_vendor_prefixed_keyframes() {
        let tree = css("@-webkit-keyframes pulse { to { opacity: 0 } }");
        assert_clean(&tree);
        assert_eq!(first_of_kind(&tree, NodeKind::Keyframe).children().next().unwrap().text(), "pulse");
    }

    // ========================================================================
    // SCSS
    // ========================================================================

    #[test]
    fn test_scss_variables_and_maps() {
        let tree = scss("$a: 1px !default; $b: (key: 1, other: 2) !global;");
        assert_clean(&tree);
        let first = nth_of_kind(&tree, NodeKind::VariableDeclaration, 0);
        assert_eq!(kinds(first), vec![NodeKind::VariableName, NodeKind::Expression, NodeKind::Flag]);
        let map = first_of_kind(&tree, NodeKind::ParenthesizedExpression);
        assert_eq!(kinds(map), vec![NodeKind::ListEntry, NodeKind::ListEntry]);
        assert_eq!(nth_of_kind(&tree, NodeKind::Flag, 1).text(), "!global");
    }

    #[test]
    fn test_scss_top_level_declaration() {
        let tree = scss("$x: 1; .a { $x: 2; width: $x; } width: $x;");
        assert_clean(&tree);
        assert_eq!(
            kinds(tree.root()),
            vec![NodeKind::VariableDeclaration, NodeKind::RuleSet, NodeKind::Declaration]
        );
    }

    #[test]
    fn test_scss_mixins() {
        let tree = scss("@mixin m($a, $b: 2) { width: $a; } .x { @include m(1, $b: 3); }");
        assert_clean(&tree);
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::MixinDeclaration)),
            vec![
                NodeKind::Identifier,
                NodeKind::FunctionParameter,
                NodeKind::FunctionParameter,
                NodeKind::Declarations,
            ]
        );
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::MixinReference)),
            vec![NodeKind::Identifier, NodeKind::FunctionArgument, NodeKind::FunctionArgument]
        );
        let keyword = nth_of_kind(&tree, NodeKind::FunctionArgument, 1);
        assert_eq!(kinds(keyword), vec![NodeKind::VariableName, NodeKind::Expression]);
    }

    #[test]
    fn test_scss_include_with_content_block() {
        let tree = scss("@include m using ($x) { a: $x; } @include n { b: c; }");
        assert_clean(&tree);
        let using = nth_of_kind(&tree, NodeKind::MixinReference, 0);
        assert_eq!(kinds(using), vec![NodeKind::Identifier, NodeKind::MixinContentDeclaration]);
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::MixinContentDeclaration)),
            vec![NodeKind::FunctionParameter, NodeKind::Declarations]
        );
        assert_eq!(
            kinds(nth_of_kind(&tree, NodeKind::MixinReference, 1)),
            vec![NodeKind::Identifier, NodeKind::Declarations]
        );
    }

    #[test]
    fn test_scss_functions() {
        let tree = scss("@function double($n) { @return $n * 2; }");
        assert_clean(&tree);
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::FunctionDeclaration)),
            vec![NodeKind::Identifier, NodeKind::FunctionParameter, NodeKind::Declarations]
        );
        let ret = first_of_kind(&tree, NodeKind::ReturnStatement);
        assert_eq!(ret.text(), "@return $n * 2");
    }

    #[test]
    fn test_scss_if_else_chain() {
        let tree = scss("@if $a == 1 { a: b } @else if $a > 2 { c: d } @else { e: f }");
        assert_clean(&tree);
        let if_statement = first_of_kind(&tree, NodeKind::IfStatement);
        assert_eq!(
            kinds(if_statement),
            vec![NodeKind::Expression, NodeKind::Declarations, NodeKind::ElseStatement]
        );
        let else_if = nth_of_kind(&tree, NodeKind::ElseStatement, 0);
        assert_eq!(
            kinds(else_if),
            vec![NodeKind::Expression, NodeKind::Declarations, NodeKind::ElseStatement]
        );
        assert_eq!(kinds(nth_of_kind(&tree, NodeKind::ElseStatement, 1)), vec![NodeKind::Declarations]);
        assert_eq!(first_of_kind(&tree, NodeKind::BinaryExpression).text(), "$a == 1");
    }

    #[test]
    fn test_scss_loops() {
        let tree = scss(
            "@for $i from 1 through 3 { .m-#{$i} { margin: $i * 4px; } } \
             @each $k, $v in $map { } @while $i > 0 { $i: $i - 1; }",
        );
        assert_clean(&tree);
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::ForStatement)),
            vec![NodeKind::VariableName, NodeKind::NumericValue, NodeKind::NumericValue, NodeKind::Declarations]
        );
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::EachStatement)),
            vec![NodeKind::VariableName, NodeKind::VariableName, NodeKind::Expression, NodeKind::Declarations]
        );
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::WhileStatement)),
            vec![NodeKind::Expression, NodeKind::Declarations]
        );
        let class = first_of_kind(&tree, NodeKind::ClassSelector);
        assert_eq!(class.text(), ".m-#{$i}");
        assert_eq!(kinds(class), vec![NodeKind::Interpolation]);
    }

    #[test]
    fn test_scss_for_missing_keywords() {
        assert_eq!(codes(&scss("@for $i in 1 { }")), vec![IssueCode::FromExpected]);
        assert_eq!(codes(&scss("@for $i from 1 { }")), vec![IssueCode::ThroughOrToExpected]);
        assert_eq!(codes(&scss("@each $i of $list { }")), vec![IssueCode::InExpected]);
    }

    #[test]
    fn test_scss_modules() {
        let tree = scss(
            "@use \"sass:math\" as m; @use \"config\" with ($a: 1); \
             @forward \"src/list\" as list-* hide list-reset, $gap;",
        );
        assert_clean(&tree);
        assert_eq!(
            kinds(nth_of_kind(&tree, NodeKind::Use, 0)),
            vec![NodeKind::StringLiteral, NodeKind::Identifier]
        );
        assert_eq!(
            kinds(nth_of_kind(&tree, NodeKind::Use, 1)),
            vec![NodeKind::StringLiteral, NodeKind::ModuleConfiguration]
        );
        let forward = first_of_kind(&tree, NodeKind::Forward);
        assert_eq!(
            kinds(forward),
            vec![NodeKind::StringLiteral, NodeKind::Identifier, NodeKind::ForwardVisibility]
        );
        assert_eq!(forward.children().nth(1).unwrap().text(), "list-*");
        assert_eq!(first_of_kind(&tree, NodeKind::ForwardVisibility).child_count(), 2);
    }

    #[test]
    fn test_scss_module_members() {
        let tree = scss(".a { width: math.div(10px, 2); height: math.$pi; }");
        assert_clean(&tree);
        let div = nth_of_kind(&tree, NodeKind::ModuleMember, 0);
        assert_eq!(kinds(div), vec![NodeKind::Identifier, NodeKind::Function]);
        let pi = nth_of_kind(&tree, NodeKind::ModuleMember, 1);
        assert_eq!(kinds(pi), vec![NodeKind::Identifier, NodeKind::Variable]);
    }

    #[test]
    fn test_scss_nested_properties() {
        let tree = scss(".a { font: { family: x; size: 1px; } margin: 0 { top: 1px; } }");
        assert_clean(&tree);
        let font = nth_of_kind(&tree, NodeKind::Declaration, 0);
        assert_eq!(kinds(font), vec![NodeKind::Property, NodeKind::NestedProperties]);
        let margin = font.parent().unwrap().children().nth(1).unwrap();
        assert_eq!(
            kinds(margin),
            vec![NodeKind::Property, NodeKind::Expression, NodeKind::NestedProperties]
        );
    }

    #[test]
    fn test_scss_placeholder_and_extend() {
        let tree = scss("%msg { color: red; } .a { @extend %msg !optional; }");
        assert_clean(&tree);
        assert_eq!(first_of_kind(&tree, NodeKind::SelectorPlaceholder).text(), "%msg");
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::ExtendsReference)),
            vec![NodeKind::Selector, NodeKind::Flag]
        );
    }

    #[test]
    fn test_scss_interpolated_property_and_nesting() {
        let tree = scss(".a { #{$p}-top: 1px; &:hover { } &-suffix { } // trailing\n }");
        assert_clean(&tree);
        let property = first_of_kind(&tree, NodeKind::Property);
        assert_eq!(property.text(), "#{$p}-top");
        assert_eq!(kinds(property), vec![NodeKind::Interpolation]);
        assert_eq!(nth_of_kind(&tree, NodeKind::NestingSelector, 1).text(), "&-suffix");
    }

    #[test]
    fn test_scss_debug_and_at_root() {
        let tree = scss(".a { @debug \"x\"; @at-root .b { c: d } @at-root (without: media) { e: f } }");
        assert_clean(&tree);
        assert_eq!(kinds(first_of_kind(&tree, NodeKind::Debug)), vec![NodeKind::Expression]);
        assert_eq!(
            kinds(nth_of_kind(&tree, NodeKind::AtRoot, 0)),
            vec![NodeKind::Selector, NodeKind::Declarations]
        );
        assert_eq!(
            kinds(nth_of_kind(&tree, NodeKind::AtRoot, 1)),
            vec![NodeKind::ParenthesizedExpression, NodeKind::Declarations]
        );
    }

    #[test]
    fn test_scss_rules_are_not_css() {
        // `@include` means nothing in plain CSS
        let tree = css(".a { @include m; }");
        assert_clean(&tree);
        assert!(tree.iter().any(|n| n.kind() == NodeKind::UnknownAtRule));
        assert!(!tree.iter().any(|n| n.kind() == NodeKind::MixinReference));
    }

    // ========================================================================
    // Less
    // ========================================================================

    #[test]
    fn test_less_mixins_and_guards() {
        let tree = less("@c: red; .m(@a; @b: 2) when (@a > 0) { width: @a; } .x { .m(1; 2); }");
        assert_clean(&tree);
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::VariableDeclaration)),
            vec![NodeKind::VariableName, NodeKind::Expression]
        );
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::MixinDeclaration)),
            vec![
                NodeKind::Identifier,
                NodeKind::FunctionParameter,
                NodeKind::FunctionParameter,
                NodeKind::LessGuard,
                NodeKind::Declarations,
            ]
        );
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::MixinReference)),
            vec![NodeKind::Identifier, NodeKind::FunctionArgument, NodeKind::FunctionArgument]
        );
    }

    #[test]
    fn test_less_mixin_references() {
        let tree = less(".a { .bordered; #ns > .m(); .c() !important; } .b:hover { x: y }");
        assert_clean(&tree);
        let refs: Vec<_> = tree.iter().filter(|n| n.kind() == NodeKind::MixinReference).collect();
        assert_eq!(refs.len(), 3);
        assert_eq!(kinds(refs[1]), vec![NodeKind::Identifier, NodeKind::Identifier]);
        assert_eq!(kinds(refs[2]), vec![NodeKind::Identifier, NodeKind::Prio]);
        assert_eq!(tree.root().children_of_kind(NodeKind::RuleSet).count(), 2);
    }

    #[test]
    fn test_less_detached_rulesets() {
        let tree = less("@detached: { color: red; }; .a { @detached(); }");
        assert_clean(&tree);
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::VariableDeclaration)),
            vec![NodeKind::VariableName, NodeKind::DetachedRuleset]
        );
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::DetachedRulesetReference)),
            vec![NodeKind::Variable]
        );
    }

    #[test]
    fn test_less_escapes_and_interpolation() {
        let tree = less(".@{name}-x { width: ~\"calc(100% - 10px)\"; @{prop}: 1; }");
        assert_clean(&tree);
        let class = first_of_kind(&tree, NodeKind::ClassSelector);
        assert_eq!(class.text(), ".@{name}-x");
        assert_eq!(kinds(class), vec![NodeKind::Interpolation]);
        assert_eq!(kinds(first_of_kind(&tree, NodeKind::EscapedValue)), vec![NodeKind::StringLiteral]);
        assert_eq!(nth_of_kind(&tree, NodeKind::Property, 1).text(), "@{prop}");
    }

    #[test]
    fn test_less_import_options_and_plugin() {
        let tree = less("@import (reference, optional) \"foo\"; @plugin \"my-plugin\";");
        assert_clean(&tree);
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::Import)),
            vec![NodeKind::ImportOptions, NodeKind::StringLiteral]
        );
        assert_eq!(first_of_kind(&tree, NodeKind::ImportOptions).child_count(), 2);
        assert_eq!(kinds(first_of_kind(&tree, NodeKind::Plugin)), vec![NodeKind::StringLiteral]);
    }

    #[test]
    fn test_less_guarded_rule_set() {
        let tree = less(".a when (@mode = dark) { color: white }");
        assert_clean(&tree);
        assert_eq!(
            kinds(first_of_kind(&tree, NodeKind::RuleSet)),
            vec![NodeKind::Selector, NodeKind::LessGuard, NodeKind::Declarations]
        );
    }

    // ========================================================================
    // Fragments
    // ========================================================================

    #[test]
    fn test_parse_fragments() {
        let decl = parse_fragment("color: red", Dialect::Css, FragmentKind::Declaration);
        assert_clean(&decl);
        assert_eq!(kinds(decl.root()), vec![NodeKind::Declaration]);

        let var = parse_fragment("$x: 1;", Dialect::Scss, FragmentKind::Declaration);
        assert_clean(&var);
        assert_eq!(kinds(var.root()), vec![NodeKind::VariableDeclaration]);

        let selector = parse_fragment("a > b", Dialect::Css, FragmentKind::Selector);
        assert_clean(&selector);
        assert_eq!(kinds(selector.root()), vec![NodeKind::Selector]);

        let expr = parse_fragment("1px + 2px", Dialect::Scss, FragmentKind::Expression);
        assert_clean(&expr);
        assert_eq!(kinds(expr.root()), vec![NodeKind::Expression]);
        assert_eq!(kinds(expr.root().children().next().unwrap()), vec![NodeKind::BinaryExpression]);
    }

    #[test]
    fn test_fragment_trailing_tokens() {
        let tree = parse_fragment("a {", Dialect::Css, FragmentKind::Selector);
        assert_eq!(codes(&tree), vec![IssueCode::LeftCurlyExpected]);
        assert_eq!(tree.root().span(), Span::new(0, 3));

        let empty = parse_fragment("", Dialect::Css, FragmentKind::Expression);
        assert_eq!(codes(&empty), vec![IssueCode::ExpressionExpected]);
    }
}
