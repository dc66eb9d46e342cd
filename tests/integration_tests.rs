// Parser Robustness Tests for Kex
//
// Table-driven suites: each case is a source snippet that must either parse
// cleanly or fail, optionally with a specific message.

use kex::error::KexError;
use kex::lexer::Lexer;
use kex::parser::Parser;

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub should_succeed: bool,
    pub expected_error_contains: Option<String>,
}

/// Test suite containing multiple test cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Run all tests in this suite
    pub fn run(&self) -> TestSuiteResults {
        let mut results = TestSuiteResults::new(&self.name);

        println!("Running test suite: {}", self.name);
        println!("{}", "=".repeat(50));

        for test in &self.tests {
            let result = run_single_test(test);
            results.add_result(&test.name, result);
        }

        results.print_summary();
        results
    }
}

/// Results for a test suite run
#[derive(Debug)]
pub struct TestSuiteResults {
    pub suite_name: String,
    pub results: Vec<(String, TestResult)>,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
}

impl TestSuiteResults {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            results: Vec::new(),
            passed: 0,
            failed: 0,
            crashed: 0,
        }
    }

    pub fn add_result(&mut self, test_name: &str, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                println!("  ok   {}", test_name);
            }
            TestResult::Fail(msg) => {
                self.failed += 1;
                println!("  FAIL {}: {}", test_name, msg);
            }
            TestResult::Crash(msg) => {
                self.crashed += 1;
                println!("  CRASH {}: {}", test_name, msg);
            }
        }
        self.results.push((test_name.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!();
        println!("Test Suite: {} - Summary", self.suite_name);
        println!("{}", "-".repeat(30));
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Crashed: {}", self.crashed);
        println!("Total:   {}", self.results.len());
        println!();
    }

    pub fn is_all_passed(&self) -> bool {
        self.crashed == 0 && self.failed == 0
    }
}

/// Run a single test case
fn run_single_test(test: &TestCase) -> TestResult {
    // Catch any panics to detect crashes
    let result = std::panic::catch_unwind(|| parse_input(&test.input));

    match result {
        Ok(parse_result) => match (parse_result, test.should_succeed) {
            (Ok(_), true) => TestResult::Pass,
            (Ok(_), false) => {
                TestResult::Fail("Expected parsing to fail, but it succeeded".to_string())
            }
            (Err(error), false) => {
                let message = error.to_string();
                match &test.expected_error_contains {
                    Some(expected) if !message.contains(expected.as_str()) => {
                        TestResult::Fail(format!(
                            "Error message '{}' doesn't contain expected text '{}'",
                            message, expected
                        ))
                    }
                    _ => TestResult::Pass,
                }
            }
            (Err(error), true) => TestResult::Fail(format!(
                "Expected parsing to succeed, but got error: {}",
                error
            )),
        },
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

/// Parse input and return result
fn parse_input(input: &str) -> Result<kex::ast::Program, KexError> {
    let mut parser = Parser::new(Lexer::new(input));
    parser.parse()
}

/// Test case builder for convenience
impl TestCase {
    pub fn should_succeed(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: true,
            expected_error_contains: None,
        }
    }

    pub fn should_fail(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: None,
        }
    }

    pub fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: Some(expected_msg.to_string()),
        }
    }
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_malformed_expressions_tests() -> TestSuite {
    let mut suite = TestSuite::new("Malformed Expressions");

    // === PARENTHESES TESTS ===

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren",
        "(1 + 2",
        "Expected ')', found end of input",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren_nested",
        "((1 + 2)",
        "Expected ')'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_paren",
        "1 + 2)",
        "Expected expression, found ')'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses",
        "()",
        "Expected expression, found ')'",
    ));

    // === BRACKET TESTS ===

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_bracket",
        "[1, 2",
        "Expected ']'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "list_trailing_comma",
        "[1, 2,]",
        "Expected expression, found ']'",
    ));

    // === BRACE TESTS ===

    suite.add_test(TestCase::should_fail_with_message(
        "dict_missing_colon",
        "{\"a\" 1}",
        "Expected ':'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "dict_trailing_comma",
        "{\"a\": 1,}",
        "Expected expression, found '}'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_brace",
        "x = 1 }",
        "Expected expression, found '}'",
    ));

    suite
}

fn create_edge_case_tests() -> TestSuite {
    let mut suite = TestSuite::new("Edge Cases");

    suite.add_test(TestCase::should_succeed("empty_input", ""));
    suite.add_test(TestCase::should_succeed("only_whitespace", "   \n\t  "));
    suite.add_test(TestCase::should_succeed("only_line_comment", "// nothing here"));
    suite.add_test(TestCase::should_succeed("only_block_comment", "/* nothing\n here */"));

    suite.add_test(TestCase::should_fail("unexpected_eof_after_operator", "1 +"));
    suite.add_test(TestCase::should_fail("unexpected_eof_in_expression", "1 + ("));

    let deep_parens = "(".repeat(100) + "1" + &")".repeat(100);
    suite.add_test(TestCase::should_succeed("deeply_nested_parens", &deep_parens));

    suite.add_test(TestCase::should_succeed(
        "statements_without_separator",
        "x = 1 y = 2 x + y",
    ));

    suite
}

fn create_operator_tests() -> TestSuite {
    let mut suite = TestSuite::new("Operator Tests");

    suite.add_test(TestCase::should_fail_with_message(
        "missing_left_operand",
        "+ 1",
        "Expected expression, found '+'",
    ));
    suite.add_test(TestCase::should_fail("missing_right_operand", "1 *"));
    suite.add_test(TestCase::should_fail("double_plus", "1 ++ 2"));
    // There is no unary minus.
    suite.add_test(TestCase::should_fail("double_minus", "1 -- 2"));
    suite.add_test(TestCase::should_fail("negative_literal", "-1"));

    // Relational operators only belong in conditions.
    suite.add_test(TestCase::should_fail_with_message(
        "comparison_at_statement_level",
        "1 < 2",
        "Expected expression, found '<'",
    ));
    suite.add_test(TestCase::should_fail("comparison_in_parens", "(1 == 2)"));
    suite.add_test(TestCase::should_fail("chained_comparison", "if 1 < 2 < 3: { }"));

    suite.add_test(TestCase::should_succeed("comparison_equal", "if 1 == 2: { }"));
    suite.add_test(TestCase::should_succeed("comparison_not_equal", "if 1 != 2: { }"));
    suite.add_test(TestCase::should_succeed("comparison_less_equal", "if 1 <= 2: { }"));
    suite.add_test(TestCase::should_succeed("comparison_greater_equal", "if 1 >= 2: { }"));
    suite.add_test(TestCase::should_succeed(
        "comparison_of_sums",
        "if a + 1 > b * 2: { }",
    ));

    suite
}

fn create_control_flow_tests() -> TestSuite {
    let mut suite = TestSuite::new("Control Flow Tests");

    suite.add_test(TestCase::should_succeed("valid_if", "if true: { x = 1 }"));
    suite.add_test(TestCase::should_succeed("empty_body", "if x: { }"));
    suite.add_test(TestCase::should_succeed(
        "if_elif_else",
        "if 1 > 2: { x = 1 } elif 2 > 1: { x = 2 } else: { x = 3 }",
    ));
    suite.add_test(TestCase::should_succeed(
        "multiple_elif",
        "if a: { } elif b: { } elif c: { x = 1 }",
    ));
    suite.add_test(TestCase::should_succeed(
        "nested_conditional",
        "if a == b: { if c: { d = 1 } else: { d = 2 } }",
    ));
    suite.add_test(TestCase::should_succeed(
        "multiline_conditional",
        "if x > 1: {\n  y = 1\n  z = 2\n}\nelse: {\n  y = 0\n}",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "if_missing_colon",
        "if 1 > 2 { x = 1 }",
        "Expected ':', found '{'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "if_missing_body",
        "if true:",
        "Expected '{', found end of input",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "if_unclosed_block",
        "if true: { x = 1",
        "Expected '}'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "dangling_else",
        "else: { x = 1 }",
        "Expected expression, found 'else'",
    ));
    suite.add_test(TestCase::should_fail("dangling_elif", "elif x: { }"));
    suite.add_test(TestCase::should_fail("else_without_colon", "if x: { } else { }"));
    suite.add_test(TestCase::should_fail("if_missing_condition", "if : { }"));

    suite
}

fn create_literal_tests() -> TestSuite {
    let mut suite = TestSuite::new("Literal Tests");

    suite.add_test(TestCase::should_succeed("integer_literal", "42"));
    suite.add_test(TestCase::should_succeed("float_literal", "3.14"));
    suite.add_test(TestCase::should_succeed("leading_dot_float", ".5"));
    suite.add_test(TestCase::should_succeed("trailing_dot_float", "42."));
    suite.add_test(TestCase::should_succeed("string_literal", "\"hello\""));
    suite.add_test(TestCase::should_succeed("boolean_true", "true"));
    suite.add_test(TestCase::should_succeed("boolean_false", "false"));
    suite.add_test(TestCase::should_succeed("empty_list", "[]"));
    suite.add_test(TestCase::should_succeed("nested_list", "[1, [2, 3], []]"));
    suite.add_test(TestCase::should_succeed("empty_dict", "{}"));
    suite.add_test(TestCase::should_succeed(
        "nested_dict",
        "{\"a\": [1], \"b\": {\"c\": 2}}",
    ));
    suite.add_test(TestCase::should_succeed("non_string_dict_keys", "{1: 2, true: 3}"));

    suite.add_test(TestCase::should_fail_with_message(
        "unterminated_string",
        "\"hello",
        "Unterminated string",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "invalid_character",
        "1 @ 2",
        "Invalid character '@'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "lone_bang",
        "!x",
        "Invalid character '!'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "integer_too_large",
        "99999999999999999999",
        "Invalid number",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "multiple_dots",
        "3.14.159",
        "Invalid number '3.14.159'",
    ));

    suite
}

fn create_assignment_tests() -> TestSuite {
    let mut suite = TestSuite::new("Assignment Tests");

    suite.add_test(TestCase::should_succeed("simple_assignment", "x = 1"));
    suite.add_test(TestCase::should_succeed("assignment_with_expression", "x = 1 + 2"));
    suite.add_test(TestCase::should_succeed("assignment_from_variable", "x = y"));
    suite.add_test(TestCase::should_succeed("assign_collection", "x = {\"k\": [1, 2]}"));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_value",
        "x =",
        "Expected expression, found end of input",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "literal_target",
        "1 = x",
        "Invalid assignment target",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "parenthesised_target",
        "(x) = 1",
        "Invalid assignment target",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "expression_target",
        "x + 1 = 2",
        "Invalid assignment target",
    ));
    suite.add_test(TestCase::should_fail("chained_assignment", "x = y = 1"));
    suite.add_test(TestCase::should_fail("assign_comparison", "x = 1 < 2"));

    suite
}

fn create_positive_tests() -> TestSuite {
    let mut suite = TestSuite::new("Positive Tests");

    suite.add_test(TestCase::should_succeed("simple_arithmetic", "1 + 2 * 3"));
    suite.add_test(TestCase::should_succeed("parentheses", "(1 + 2) * 3"));
    suite.add_test(TestCase::should_succeed("variable_assignment", "x = 42"));
    suite.add_test(TestCase::should_succeed(
        "string_concatenation",
        "\"hello\" + \" world\"",
    ));
    suite.add_test(TestCase::should_succeed(
        "commented_program",
        "x = 1 // one\n/* two */ y = x / 2",
    ));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    let mut all_passed = true;

    let suites = vec![
        create_malformed_expressions_tests(),
        create_edge_case_tests(),
        create_operator_tests(),
        create_control_flow_tests(),
        create_literal_tests(),
        create_assignment_tests(),
        create_positive_tests(),
    ];

    for suite in suites {
        let results = suite.run();
        if !results.is_all_passed() {
            all_passed = false;
        }
    }

    assert!(all_passed, "Some parser tests failed. See output above for details.");
}
