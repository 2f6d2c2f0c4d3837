use rusqlite::{params, OptionalExtension};
use serde::Serialize;

use crate::{SqliteStore, StoreError};

/// A scout or administrator, identified by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub token: String,
    pub admin: bool,
}

impl SqliteStore {
    /// Create a user with a fresh id and access token.
    pub fn add_user(&self, name: &str, admin: bool) -> Result<User, StoreError> {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            token: uuid::Uuid::new_v4().simple().to_string(),
            admin,
        };
        if user.name.is_empty() {
            return Err(StoreError::Invalid("user name is empty".to_string()));
        }
        self.conn.execute(
            "INSERT INTO users (id, name, token, admin) VALUES (?1, ?2, ?3, ?4)",
            params![user.id, user.name, user.token, user.admin],
        )?;
        log::info!("added user {} (admin: {})", user.name, user.admin);
        Ok(user)
    }

    pub fn user_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name, token, admin FROM users WHERE token = ?1",
                params![token],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        token: row.get(2)?,
                        admin: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, token, admin FROM users ORDER BY name")?;
        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    token: row.get(2)?,
                    admin: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_user_generates_distinct_tokens() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.add_user("Sam", false).unwrap();
        let b = store.add_user("Lead", true).unwrap();
        assert_ne!(a.token, b.token);
        assert_ne!(a.id, b.id);
        assert_eq!(a.token.len(), 32);

        let found = store.user_by_token(&b.token).unwrap().unwrap();
        assert_eq!(found, b);
        assert!(found.admin);
    }

    #[test]
    fn unknown_token_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.user_by_token("nope").unwrap(), None);
    }

    #[test]
    fn blank_name_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(store.add_user("  ", false), Err(StoreError::Invalid(_))));
    }

    #[test]
    fn list_users_sorted_by_name() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.add_user("Zed", false).unwrap();
        store.add_user("Amy", true).unwrap();
        let names: Vec<String> = store.list_users().unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, ["Amy", "Zed"]);
    }
}
