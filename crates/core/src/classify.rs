//! Keyword classification of user input.

/// Keywords selecting [`Category::ChildcareEmpty`].
pub const CHILDCARE_KEYWORDS: [&str; 2] = ["babysitter", "baby"];

/// Keywords selecting [`Category::HomeCookMatch`].
pub const HOME_COOK_KEYWORDS: [&str; 3] = ["cook", "dinner", "chef"];

/// The scripted reply category an input falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// The user asks for childcare, none is available.
    ChildcareEmpty,
    /// The user asks for a home cook, three are recommended.
    HomeCookMatch,
    /// Anything else.
    Fallback,
}

impl Category {
    /// Classifies an input by substring match on its lowercase form.
    ///
    /// Childcare keywords take precedence over home cook keywords.
    pub fn classify(input: &str) -> Self {
        let input = input.to_lowercase();
        let mentions = |keywords: &[&str]| {
            keywords.iter().any(|keyword| input.contains(keyword))
        };

        if mentions(&CHILDCARE_KEYWORDS[..]) {
            Category::ChildcareEmpty
        } else if mentions(&HOME_COOK_KEYWORDS[..]) {
            Category::HomeCookMatch
        } else {
            Category::Fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let cases = [
            ("I need a babysitter tonight", Category::ChildcareEmpty),
            ("BABY stuff", Category::ChildcareEmpty),
            ("a chef to cook for the baby", Category::ChildcareEmpty),
            ("Can you help me find a chef for dinner?", Category::HomeCookMatch),
            ("Who can COOK?", Category::HomeCookMatch),
            ("Cookies", Category::HomeCookMatch),
            ("tour guide please", Category::Fallback),
            ("", Category::Fallback),
        ];
        for (input, expected) in cases {
            assert_eq!(Category::classify(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        let input = "Dinner for six";
        assert_eq!(Category::classify(input), Category::classify(input));
    }
}
