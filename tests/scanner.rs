#[cfg(test)]
mod scanner_tests {
    use rox::scanner::*;
    use rox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_keywords_and_operators() {
        assert_token_sequence(
            "class B < A { } break; a != b >= c // trailing comment",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "B"),
                (TokenType::LESS, "<"),
                (TokenType::IDENTIFIER, "A"),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::BREAK, "break"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::IDENTIFIER, "a"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::IDENTIFIER, "c"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_literals_carry_values_and_lines() {
        let tokens: Vec<Token> = Scanner::new(b"12.5 \"multi\nline\" 7")
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].to_string(), "NUMBER 12.5 12.5");
        assert_eq!(tokens[1].to_string(), "STRING \"multi\nline\" multi\nline");
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].to_string(), "NUMBER 7 7.0");
        assert_eq!(tokens[3].to_string(), "EOF  null");
    }

    #[test]
    fn test_unterminated_string_is_reported() {
        let results: Vec<_> = Scanner::new(b"\"open").collect();

        assert_eq!(results.len(), 2);
        let err = results[0].as_ref().unwrap_err();
        assert_eq!(err.to_string(), "[line 1] Error: Unterminated string.");
        assert_eq!(results[1].as_ref().unwrap().token_type, TokenType::EOF);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source.as_bytes());

        let results: Vec<_> = scanner.collect();

        // COMMA, DOT, error('$'), LEFT_PAREN, error('#'), EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            let message = err.to_string();
            assert!(
                message.contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                message
            );
        }

        fn assert_token_matches(
            result: &rox::error::Result<Token>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_non_ascii_character_reported_once() {
        let (tokens, errors) = scan_all("é;".as_bytes());

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error: Unexpected character: é"
        );
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token_type, TokenType::SEMICOLON);
    }
}
