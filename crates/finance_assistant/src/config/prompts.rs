//! Prompt templates and output limits for each assistant task

/// Maximum output tokens for an investment return calculation
pub const INVESTMENT_MAX_TOKENS: u32 = 500;

/// Maximum output tokens for an expense categorization
pub const EXPENSE_MAX_TOKENS: u32 = 50;

/// Build the investment return prompt.
///
/// Numbers use the shortest `Display` form of `f64`, so whole values
/// render without a fractional part (`10000.0` becomes `10000`).
pub fn investment_prompt(initial_investment: f64, years: f64, expected_return: f64) -> String {
    format!(
        "Calculate the potential returns for an initial investment of {} over {} years \
         with an expected annual return of {}%.\n\
         \n\
         Provide the calculation steps and the final amount in a clear and easy-to-understand format.",
        initial_investment, years, expected_return
    )
}

/// Build the expense categorization prompt
pub fn expense_prompt(description: &str) -> String {
    format!("Categorize the following expense: {}", description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_investment_prompt_embeds_values_in_order() {
        let prompt = investment_prompt(10000.0, 10.0, 7.0);
        assert!(prompt.starts_with(
            "Calculate the potential returns for an initial investment of 10000 over 10 years \
             with an expected annual return of 7%."
        ));
        assert!(prompt.ends_with("in a clear and easy-to-understand format."));
    }

    #[test]
    fn test_investment_prompt_accepts_unusual_values() {
        let prompt = investment_prompt(-250.5, 0.5, 0.0);
        assert!(prompt.contains("initial investment of -250.5 over 0.5 years"));
        assert!(prompt.contains("annual return of 0%"));
    }

    #[test]
    fn test_expense_prompt() {
        assert_eq!(
            expense_prompt("Paid rent for May"),
            "Categorize the following expense: Paid rent for May"
        );
    }
}
