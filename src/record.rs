// Generic record trait for any line-storable type

use crate::error::FormatError;

/// Field delimiter used in data files
pub const DELIMITER: char = ',';

/// Core trait that any storable record must implement
///
/// Values are written verbatim. A field containing [`DELIMITER`] will not
/// survive a round trip since no quoting or escaping is applied.
pub trait Record: Clone + Send + Sync + 'static {
    /// Number of delimited fields in one serialized line
    const FIELD_COUNT: usize;

    /// Tag naming this record kind (e.g., "student")
    /// Used to look up validators in a registry
    fn kind() -> &'static str
    where
        Self: Sized;

    /// Encode this record as a single line, without terminator
    fn serialize_line(&self) -> String;

    /// Decode a record from a single line, without terminator
    fn deserialize_line(line: &str) -> Result<Self, FormatError>
    where
        Self: Sized;
}

/// Split a line on [`DELIMITER`], requiring exactly `expected` fields
pub fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, FormatError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != expected {
        return Err(FormatError::FieldCount {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Join fields with [`DELIMITER`]
pub fn join_fields(fields: &[&str]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(DELIMITER);
        }
        line.push_str(field);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Pair {
        key: String,
        value: String,
    }

    impl Record for Pair {
        const FIELD_COUNT: usize = 2;

        fn kind() -> &'static str {
            "pair"
        }

        fn serialize_line(&self) -> String {
            join_fields(&[self.key.as_str(), self.value.as_str()])
        }

        fn deserialize_line(line: &str) -> Result<Self, FormatError> {
            let fields = split_fields(line, Self::FIELD_COUNT)?;
            Ok(Pair {
                key: fields[0].to_string(),
                value: fields[1].to_string(),
            })
        }
    }

    #[test]
    fn test_record_trait_implementation() {
        let pair = Pair {
            key: "color".to_string(),
            value: "blue".to_string(),
        };

        assert_eq!(Pair::kind(), "pair");
        assert_eq!(pair.serialize_line(), "color,blue");
        assert_eq!(Pair::deserialize_line("color,blue").unwrap(), pair);
    }

    #[test]
    fn test_split_fields_wrong_count() {
        let err = split_fields("a,b,c", 2).unwrap_err();
        assert!(matches!(err, FormatError::FieldCount { expected: 2, found: 3 }));

        // An empty line is one empty field
        let err = split_fields("", 2).unwrap_err();
        assert!(matches!(err, FormatError::FieldCount { expected: 2, found: 1 }));
    }

    #[test]
    fn test_split_fields_keeps_empty_fields() {
        let fields = split_fields(",x,", 3).unwrap();
        assert_eq!(fields, vec!["", "x", ""]);
    }

    #[test]
    fn test_join_fields() {
        assert_eq!(join_fields(&["a", "b", "c"]), "a,b,c");
        assert_eq!(join_fields(&[]), "");
    }
}
