//! The person record served by the data service.

use serde::{Deserialize, Serialize};

/// A person with a postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub address: Address,
}

/// Postal address nested inside [`Person`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Person {
    /// The fixed record. Built fresh on every call; nothing is cached.
    pub fn sample() -> Self {
        Self {
            id: 1,
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            age: 30,
            address: Address {
                street: "123 Main St".to_string(),
                city: "Anytown".to_string(),
                state: "CA".to_string(),
                zip: "12345".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sample_wire_shape() {
        let value = serde_json::to_value(Person::sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "John Doe",
                "email": "john.doe@example.com",
                "age": 30,
                "address": {
                    "street": "123 Main St",
                    "city": "Anytown",
                    "state": "CA",
                    "zip": "12345"
                }
            })
        );
    }

    #[test]
    fn sample_is_stable() {
        assert_eq!(Person::sample(), Person::sample());
    }
}
