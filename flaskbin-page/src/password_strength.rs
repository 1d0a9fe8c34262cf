const MIN_PASSWORD_LENGTH: usize = 8;
const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLevel {
    fn from_score(score: u8) -> Self {
        match score {
            0 => StrengthLevel::VeryWeak,
            1 => StrengthLevel::Weak,
            2 => StrengthLevel::Fair,
            3 => StrengthLevel::Good,
            _ => StrengthLevel::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Good => "Good",
            StrengthLevel::Strong => "Strong",
        }
    }

    pub fn meter_class(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak | StrengthLevel::Weak => "bg-danger",
            StrengthLevel::Fair => "bg-warning",
            StrengthLevel::Good => "bg-info",
            StrengthLevel::Strong => "bg-success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrengthReport {
    pub score: u8,
    pub level: StrengthLevel,
    pub feedback: Option<&'static str>,
}

impl StrengthReport {
    pub fn text(&self) -> String {
        match self.feedback {
            Some(feedback) if self.level != StrengthLevel::Strong => {
                format!("{}: {}", self.level.label(), feedback)
            }
            _ => self.level.label().to_string(),
        }
    }
}

/// Scores a password for the registration form meter. An empty password has
/// no report and the meter should be cleared.
pub fn evaluate_password(password: &str) -> Option<StrengthReport> {
    if password.is_empty() {
        return None;
    }

    let rules: [(bool, &'static str); 4] = [
        (
            password.chars().count() >= MIN_PASSWORD_LENGTH,
            "Password must be at least 8 characters",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Add numbers",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Add uppercase letters",
        ),
        (
            password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
            "Add special characters",
        ),
    ];

    let score = rules.iter().filter(|(passed, _)| *passed).count() as u8;
    let feedback = rules
        .iter()
        .find(|(passed, _)| !*passed)
        .map(|(_, hint)| *hint);

    Some(StrengthReport {
        score,
        level: StrengthLevel::from_score(score),
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_clears_meter() {
        assert_eq!(evaluate_password(""), None);
    }

    #[test]
    fn feedback_names_first_failing_rule() {
        let report = evaluate_password("abc").unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.level.meter_class(), "bg-danger");
        assert_eq!(report.text(), "Very Weak: Password must be at least 8 characters");

        let report = evaluate_password("abcdefgh1").unwrap();
        assert_eq!(report.score, 2);
        assert_eq!(report.text(), "Fair: Add uppercase letters");

        let report = evaluate_password("Abcdefgh1").unwrap();
        assert_eq!(report.level, StrengthLevel::Good);
        assert_eq!(report.text(), "Good: Add special characters");
    }

    #[test]
    fn short_password_with_other_rules_is_weak() {
        let report = evaluate_password("A1!").unwrap();
        assert_eq!(report.score, 3);
        assert_eq!(report.text(), "Good: Password must be at least 8 characters");

        let report = evaluate_password("abcdefgh").unwrap();
        assert_eq!(report.level, StrengthLevel::Weak);
        assert_eq!(report.text(), "Weak: Add numbers");
    }

    #[test]
    fn all_rules_is_strong() {
        let report = evaluate_password("Hunter2{secret}").unwrap();
        assert_eq!(report.score, 4);
        assert_eq!(report.feedback, None);
        assert_eq!(report.level.meter_class(), "bg-success");
        assert_eq!(report.text(), "Strong");
    }

    #[test]
    fn unlisted_symbols_are_not_special() {
        let report = evaluate_password("Abcdefg1-_~").unwrap();
        assert_eq!(report.feedback, Some("Add special characters"));
    }
}
