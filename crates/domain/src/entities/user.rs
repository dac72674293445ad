use serde::{Deserialize, Serialize};

/// Core User entity - represents the business domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl User {
    pub fn new(id: i32, name: String, email: String, age: i32) -> Self {
        Self {
            id,
            name,
            email,
            age,
        }
    }
}

/// The mutable fields of a user, already validated and normalized.
/// Used for both create and full replace; `id` is always system-generated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl NewUser {
    pub fn new(name: String, email: String, age: i32) -> Self {
        Self { name, email, age }
    }
}
