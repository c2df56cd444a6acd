/// Compute effective limit with precedence: global flag -> configured default.
#[must_use]
pub fn effective_limit(flag: Option<u32>, configured: u32) -> u32 {
    flag.unwrap_or(configured).max(1)
}

#[cfg(test)]
mod tests {
    use super::effective_limit;

    #[test]
    fn flag_takes_precedence() {
        assert_eq!(effective_limit(Some(5), 20), 5);
    }

    #[test]
    fn configured_default_used_when_flag_missing() {
        assert_eq!(effective_limit(None, 20), 20);
    }

    #[test]
    fn zero_is_raised_to_one() {
        assert_eq!(effective_limit(Some(0), 20), 1);
    }
}
