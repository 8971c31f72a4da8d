#[cfg(test)]
/// Parser unit tests.
///
/// These cover the accepted forms, the placement rules, and error recovery (one clear error per problem, no
/// cascades).
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_str(source: &str) -> Result<Script, Vec<SyntaxError>> {
        let tokens = lexer::lex(source).map_err(|_| vec![])?;
        parse(&tokens)
    }

    fn messages(source: &str) -> Vec<String> {
        parse_str(source)
            .expect_err("source should be rejected")
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    #[test]
    fn test_parse_nested_blocks() {
        let source = r#"
describe "Adder" {
  context "with positives" {
    it "adds" {
      pass
      fail "expected 2 got 3"
    }
  }
}
"#;
        let script = parse_str(source).unwrap();
        assert_eq!(script.items.len(), 1);
        let Item::Block(describe) = &script.items[0].node else {
            panic!("Expected describe block");
        };
        assert_eq!(describe.kind, BlockKind::Describe);
        assert_eq!(describe.label, "Adder");

        let Item::Block(context) = &describe.body[0].node else {
            panic!("Expected context block");
        };
        assert_eq!(context.kind, BlockKind::Context);

        let Item::Block(it) = &context.body[0].node else {
            panic!("Expected it block");
        };
        assert_eq!(it.label, "adds");
        assert_eq!(it.body[0].node, Item::Pass);
        assert_eq!(it.body[1].node, Item::Fail("expected 2 got 3".into()));
        assert_eq!(script.assertion_count(), 2);
    }

    #[test]
    fn test_empty_script() {
        let script = parse_str("# nothing here\n").unwrap();
        assert!(script.items.is_empty());
    }

    #[test]
    fn test_top_level_it_is_allowed() {
        let script = parse_str("it \"stands alone\" { pass }").unwrap();
        assert_eq!(script.assertion_count(), 1);
    }

    #[test]
    fn test_abort_is_allowed_anywhere() {
        let script = parse_str("abort \"early\"\ndescribe \"x\" { abort \"inner\" }").unwrap();
        assert_eq!(script.items[0].node, Item::Abort("early".into()));
    }

    #[test]
    fn test_aliases_parse_as_blocks() {
        let script = parse_str("describe \"x\" { when \"y\" { specify \"z\" { pass } } }").unwrap();
        assert_eq!(script.assertion_count(), 1);
    }

    #[test]
    fn test_header_span_covers_keyword_and_label() {
        let source = "describe \"Adder\" {}";
        let script = parse_str(source).unwrap();
        assert_eq!(&source[script.items[0].span.start..script.items[0].span.end], "describe \"Adder\"");
    }

    #[test]
    fn test_pass_outside_it_is_rejected() {
        assert_eq!(
            messages("describe \"x\" { pass }"),
            vec!["`pass` is only allowed inside an `it` block"]
        );
    }

    #[test]
    fn test_block_inside_it_is_rejected() {
        assert_eq!(
            messages("it \"a\" { describe \"b\" { } }"),
            vec!["`describe` cannot be nested inside an `it` block"]
        );
    }

    #[test]
    fn test_missing_label_reports_single_error() {
        let errs = messages("describe { it \"a\" { pass } }\ndescribe \"ok\" { }");
        assert_eq!(errs, vec!["expected a label string after `describe`, found `{`"]);
    }

    #[test]
    fn test_unclosed_block() {
        let errs = parse_str("describe \"open\" {\n  it \"a\" { pass }\n").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].message, "unclosed `describe` block \"open\"");
        assert_eq!(errs[0].span, Span::new(0, 15));
    }

    #[test]
    fn test_unmatched_close_brace() {
        assert_eq!(messages("}"), vec!["unmatched `}`"]);
    }

    #[test]
    fn test_unknown_directive_skips_its_body() {
        let errs = parse_str("describe \"x\" {\n  expect \"y\" { pass }\n  it \"z\" { pass }\n}").unwrap_err();
        assert_eq!(errs.len(), 1, "{errs:?}");
        assert_eq!(errs[0].message, "unknown directive `expect`");
        assert!(errs[0].hints[0].contains("describe, context, it, pass, fail, abort"));
    }

    #[test]
    fn test_fail_requires_message() {
        assert_eq!(
            messages("it \"a\" { fail }"),
            vec!["expected a failure message string after `fail`, found `}`"]
        );
    }

    #[test]
    fn test_independent_errors_are_all_reported() {
        let errs = messages("pass\nit \"a\" { it \"b\" { } }\nfail \"m\"");
        assert_eq!(errs.len(), 3, "{errs:?}");
    }

    #[test]
    fn test_empty_token_slice_is_empty_script() {
        let script = parse(&[]).unwrap();
        assert!(script.items.is_empty());
    }
}
