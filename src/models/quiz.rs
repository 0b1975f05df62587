// src/models/quiz.rs

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like `null_as_default`, and `null` list items also become empty values.
fn null_items_as_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

/// A single question with its answers, in the order the author gave them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestQuestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_items_as_default")]
    pub answers: Vec<String>,
}

/// DTO for creating or submitting a test.
/// Forwarded to the test module as-is; missing or `null` fields decode to empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_items_as_default")]
    pub questions: Vec<TestQuestion>,
}

/// A test as reported back by the test module's `fetch` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredTest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: String,
    #[serde(default, deserialize_with = "null_items_as_default")]
    pub questions: Vec<TestQuestion>,
}

/// Response envelope for the listing route.
#[derive(Debug, Serialize)]
pub struct TestListResponse {
    pub tests: Vec<StoredTest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_tolerates_missing_and_unknown_fields() {
        let def: TestDefinition =
            serde_json::from_str(r#"{"questions":[{"question":"2+2?"}],"extra":true}"#).unwrap();
        assert_eq!(def.name, "");
        assert_eq!(def.questions.len(), 1);
        assert!(def.questions[0].answers.is_empty());
    }

    #[test]
    fn definition_rejects_wrong_types() {
        let res = serde_json::from_str::<TestDefinition>(r#"{"name": 42}"#);
        assert!(res.is_err());
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let def: TestDefinition = serde_json::from_str(
            r#"{"name":null,"questions":[null,{"question":null,"answers":["a",null]}]}"#,
        )
        .unwrap();
        assert_eq!(def.name, "");
        assert_eq!(def.questions[0], TestQuestion::default());
        assert_eq!(def.questions[1].answers, vec!["a", ""]);

        let tests: Vec<StoredTest> = serde_json::from_str(
            r#"[{"id":null,"name":"A","creator":null,"questions":null}]"#,
        )
        .unwrap();
        assert_eq!(tests[0].id, 0);
        assert_eq!(tests[0].creator, "");
        assert!(tests[0].questions.is_empty());
    }

    #[test]
    fn stored_test_keeps_answer_order() {
        let test: StoredTest = serde_json::from_str(
            r#"{"id":7,"name":"Math","creator":"ann@example.com",
                "questions":[{"question":"1+1?","answers":["2","11","3"]}]}"#,
        )
        .unwrap();
        assert_eq!(test.id, 7);
        assert_eq!(test.questions[0].answers, vec!["2", "11", "3"]);
    }
}
