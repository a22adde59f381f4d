//! The serialized finance document
//!
//! The same JSON shape is used for the persisted blob, for exports and for
//! backups. Decoding is validated: every collection is decoded element by
//! element and each entity's own `validate()` runs, so a rejected document
//! reports every offending path instead of the first serde error.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FinanceError, FinanceResult, ImportError, ImportIssue};
use crate::models::FinanceState;

/// Format version written into every document
pub const DOCUMENT_VERSION: u64 = 1;

/// Top-level keys holding entity collections, in document order
pub const COLLECTION_KEYS: [&str; 7] = [
    "accounts",
    "categories",
    "transactions",
    "macroGroups",
    "recurrings",
    "credits",
    "goals",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    #[serde(flatten)]
    state: &'a FinanceState,
    version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_at: Option<DateTime<Utc>>,
}

/// What a successful decode found besides the state itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// The document's `version`, if present
    pub version: Option<u64>,
    /// The document's `exportedAt`, if present
    pub exported_at: Option<DateTime<Utc>>,
    /// Collection keys that were absent and defaulted to empty
    pub missing: Vec<&'static str>,
    /// Number of records decoded
    pub records: usize,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Serialize a state into the document shape
pub fn encode(
    state: &FinanceState,
    exported_at: Option<DateTime<Utc>>,
    pretty: bool,
) -> FinanceResult<String> {
    let doc = DocumentRef {
        state,
        version: DOCUMENT_VERSION,
        exported_at,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };

    json.map_err(|e| FinanceError::Export(format!("Failed to serialize document: {}", e)))
}

/// Decode and validate a document
pub fn decode(json: &str) -> Result<(FinanceState, ImportReport), ImportError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ImportError::Parse(e.to_string()))?;

    let map = match value {
        Value::Object(map) => map,
        other => return Err(ImportError::NotAnObject(kind_of(&other))),
    };

    let mut decoder = Decoder::default();

    let version = decoder.version(&map);
    let exported_at = decoder.exported_at(&map);

    let state = FinanceState {
        accounts: decoder.collection(&map, "accounts"),
        categories: decoder.collection(&map, "categories"),
        transactions: decoder.collection(&map, "transactions"),
        macro_groups: decoder.collection(&map, "macroGroups"),
        recurrings: decoder.collection(&map, "recurrings"),
        credits: decoder.collection(&map, "credits"),
        goals: decoder.collection(&map, "goals"),
    };

    decoder.validate(&state);

    if !decoder.issues.is_empty() {
        return Err(ImportError::Invalid(decoder.issues));
    }

    let report = ImportReport {
        version,
        exported_at,
        missing: decoder.missing,
        records: state.record_count(),
    };
    Ok((state, report))
}

#[derive(Default)]
struct Decoder {
    issues: Vec<ImportIssue>,
    missing: Vec<&'static str>,
}

impl Decoder {
    fn issue(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ImportIssue::new(path, message));
    }

    fn version(&mut self, map: &Map<String, Value>) -> Option<u64> {
        let value = map.get("version")?;
        match value.as_u64() {
            Some(v) if v <= DOCUMENT_VERSION => Some(v),
            Some(v) => {
                self.issue("version", format!("unsupported document version {}", v));
                None
            }
            None => {
                self.issue("version", format!("expected an integer, found {}", kind_of(value)));
                None
            }
        }
    }

    fn exported_at(&mut self, map: &Map<String, Value>) -> Option<DateTime<Utc>> {
        let value = map.get("exportedAt")?;
        if value.is_null() {
            return None;
        }
        match serde_json::from_value(value.clone()) {
            Ok(instant) => Some(instant),
            Err(e) => {
                self.issue("exportedAt", e.to_string());
                None
            }
        }
    }

    /// Decode one collection element by element. Absent or null keys
    /// default to an empty list and are reported as missing.
    fn collection<T: DeserializeOwned>(
        &mut self,
        map: &Map<String, Value>,
        key: &'static str,
    ) -> Vec<T> {
        let items = match map.get(key) {
            None | Some(Value::Null) => {
                self.missing.push(key);
                return Vec::new();
            }
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.issue(key, format!("expected an array, found {}", kind_of(other)));
                return Vec::new();
            }
        };

        let mut decoded = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match serde_json::from_value(item.clone()) {
                Ok(entity) => decoded.push(entity),
                Err(e) => self.issue(format!("{}[{}]", key, i), e.to_string()),
            }
        }
        decoded
    }

    fn check<E: Display>(&mut self, path: String, result: Result<(), E>) {
        if let Err(e) = result {
            self.issue(path, e.to_string());
        }
    }

    fn unique<'a, K, I>(&mut self, key: &str, ids: I)
    where
        K: Eq + Hash + Display + 'a,
        I: IntoIterator<Item = &'a K>,
    {
        let mut seen = HashSet::new();
        for (i, id) in ids.into_iter().enumerate() {
            if !seen.insert(id) {
                self.issue(format!("{}[{}].id", key, i), format!("duplicate id {}", id));
            }
        }
    }

    fn validate(&mut self, state: &FinanceState) {
        for (i, a) in state.accounts.iter().enumerate() {
            self.check(format!("accounts[{}]", i), a.validate());
        }
        for (i, c) in state.categories.iter().enumerate() {
            self.check(format!("categories[{}]", i), c.validate());
        }
        for (i, t) in state.transactions.iter().enumerate() {
            self.check(format!("transactions[{}]", i), t.validate());
        }
        for (i, g) in state.macro_groups.iter().enumerate() {
            for (j, m) in g.macros.iter().enumerate() {
                self.check(format!("macroGroups[{}].macros[{}]", i, j), m.validate());
            }
        }
        for (i, r) in state.recurrings.iter().enumerate() {
            self.check(format!("recurrings[{}]", i), r.validate());
        }
        for (i, c) in state.credits.iter().enumerate() {
            self.check(format!("credits[{}]", i), c.validate());
        }
        for (i, g) in state.goals.iter().enumerate() {
            self.check(format!("goals[{}]", i), g.validate());
        }

        self.unique("accounts", state.accounts.iter().map(|a| &a.id));
        self.unique("categories", state.categories.iter().map(|c| &c.id));
        self.unique("transactions", state.transactions.iter().map(|t| &t.id));
        self.unique("macroGroups", state.macro_groups.iter().map(|g| &g.id));
        self.unique("recurrings", state.recurrings.iter().map(|r| &r.id));
        self.unique("credits", state.credits.iter().map(|c| &c.id));
        self.unique("goals", state.goals.iter().map(|g| &g.id));
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Credit, Money, NewTransaction};
    use chrono::TimeZone;

    fn sample_state() -> FinanceState {
        let mut state = FinanceState::seeded();
        let bank = state.accounts[1].id.clone();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        state.transactions.push(
            NewTransaction::income(bank.clone(), Money::from_units(500))
                .with_description("Salary")
                .into_transaction(now),
        );
        state
            .credits
            .push(Credit::new("Laptop", Money::from_units(1200), Money::from_units(100), 10, bank));
        state
    }

    #[test]
    fn test_encode_has_version_and_camel_case_keys() {
        let exported_at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let json = encode(&sample_state(), Some(exported_at), true).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert!(value["exportedAt"].is_string());
        for key in COLLECTION_KEYS {
            assert!(value[key].is_array(), "missing {}", key);
        }
        assert!(value["credits"][0]["monthlyInstallment"].is_number());
        assert_eq!(value["transactions"][0]["type"], "income");
    }

    #[test]
    fn test_encode_without_timestamp_omits_key() {
        let json = encode(&FinanceState::default(), None, false).unwrap();
        assert!(!json.contains("exportedAt"));
    }

    #[test]
    fn test_decode_round_trip() {
        let state = sample_state();
        let json = encode(&state, None, false).unwrap();
        let (decoded, report) = decode(&json).unwrap();

        assert_eq!(decoded, state);
        assert_eq!(report.version, Some(1));
        assert!(report.is_complete());
        assert_eq!(report.records, state.record_count());
    }

    #[test]
    fn test_decode_partial_document_defaults_to_empty() {
        let (state, report) = decode(r#"{"accounts": []}"#).unwrap();

        assert_eq!(state, FinanceState::default());
        assert_eq!(report.version, None);
        assert_eq!(
            report.missing,
            vec!["categories", "transactions", "macroGroups", "recurrings", "credits", "goals"]
        );
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(decode("{not json"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert_eq!(decode("[1, 2]"), Err(ImportError::NotAnObject("an array")));
        assert_eq!(decode("\"x\""), Err(ImportError::NotAnObject("a string")));
    }

    #[test]
    fn test_decode_reports_every_bad_path() {
        let json = r#"{
            "accounts": "nope",
            "transactions": [
                {"id": "t1", "type": "expense", "amount": 5, "date": "2024-03-01T00:00:00Z", "accountId": "a"},
                {"id": "t2", "type": "bogus", "amount": 5, "date": "2024-03-01T00:00:00Z", "accountId": "a"}
            ],
            "credits": [
                {"id": "c1", "name": "Car", "total": 100, "paid": 150, "monthlyInstallment": 10, "dueDay": 3, "accountId": "a"}
            ]
        }"#;

        let err = decode(json).unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["accounts", "transactions[1]", "credits[0]"]);
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let mut state = FinanceState::default();
        let account = Account::new("Cash", AccountType::Cash);
        state.accounts.push(account.clone());
        state.accounts.push(account);
        let json = encode(&state, None, false).unwrap();

        let err = decode(&json).unwrap_err();
        assert_eq!(err.issues()[0].path, "accounts[1].id");
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let err = decode(r#"{"version": 7}"#).unwrap_err();
        assert_eq!(err.issues()[0].path, "version");
    }
}
