use uuid::Uuid;

/// Hands out fresh identifiers for filters. Values are opaque to the builder.
pub trait IdentifierSource {
    fn next_identifier(&mut self) -> String;
}

/// Random v4 UUIDs in upper-case hyphenated form.
#[derive(Debug, Default)]
pub struct UuidSource;

impl IdentifierSource for UuidSource {
    fn next_identifier(&mut self) -> String {
        Uuid::new_v4().hyphenated().to_string().to_uppercase()
    }
}

/// Counts upwards from 1, formatted like a UUID. Stable output for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct SequentialSource {
    next: u128,
}

#[cfg(test)]
impl IdentifierSource for SequentialSource {
    fn next_identifier(&mut self) -> String {
        self.next += 1;
        Uuid::from_u128(self.next).hyphenated().to_string().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_source_is_upper_case_and_hyphenated() {
        let id = UuidSource.next_identifier();
        assert_eq!(id.len(), 36);
        assert_eq!(id, id.to_uppercase());
        assert_eq!(id.matches('-').count(), 4);
        assert_ne!(id, UuidSource.next_identifier());
    }

    #[test]
    fn sequential_source_counts() {
        let mut source = SequentialSource::default();
        assert_eq!(source.next_identifier(), "00000000-0000-0000-0000-000000000001");
        assert_eq!(source.next_identifier(), "00000000-0000-0000-0000-000000000002");
    }
}
