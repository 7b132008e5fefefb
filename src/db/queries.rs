use crate::db::Database;
use crate::error::Result;
use crate::models::{CartLine, ChatMessage, LoginMethod, Sender, Session};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tracing::warn;

pub const SETTING_THEME: &str = "theme";
pub const SETTING_LANGUAGE: &str = "language";

// Settings Queries

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(())
        })
    }
}

// Session Queries

impl Database {
    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO session
                    (id, method, identifier, display_name, login_time, last_active)
                VALUES (1, ?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    session.method.kind(),
                    session.method.identifier(),
                    session.display_name,
                    session.login_time.to_rfc3339(),
                    session.last_active.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    /// The persisted session, if the user did not log out. Rows that no
    /// longer parse are treated as logged out.
    pub fn load_session(&self) -> Result<Option<Session>> {
        let row = self.with_conn(|conn| {
            conn.query_row("SELECT * FROM session WHERE id = 1", [], row_to_session)
                .optional()
                .map_err(Into::into)
        })?;
        Ok(row.flatten())
    }

    pub fn clear_session(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM session", [])?;
            Ok(())
        })
    }

    pub fn touch_session(&self, last_active: DateTime<Utc>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE session SET last_active = ?1 WHERE id = 1",
                [last_active.to_rfc3339()],
            )?;
            Ok(())
        })
    }
}

fn row_to_session(row: &Row) -> rusqlite::Result<Option<Session>> {
    let kind: String = row.get("method")?;
    let identifier: String = row.get("identifier")?;
    let login_time_str: String = row.get("login_time")?;
    let last_active_str: String = row.get("last_active")?;

    let Some(method) = LoginMethod::from_parts(&kind, &identifier) else {
        warn!(method = %kind, "Unknown login method in database, ignoring session");
        return Ok(None);
    };

    Ok(Some(Session {
        method,
        display_name: row.get("display_name")?,
        login_time: parse_timestamp(&login_time_str),
        last_active: parse_timestamp(&last_active_str),
    }))
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

// Cart Queries

impl Database {
    pub fn get_cart(&self) -> Result<Vec<CartLine>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT product_id, quantity FROM cart_items ORDER BY added_at, product_id",
            )?;
            let lines = stmt
                .query_map([], |row| {
                    Ok(CartLine {
                        product_id: row.get(0)?,
                        quantity: row.get(1)?,
                    })
                })?
                .filter_map(readable_row)
                .collect();
            Ok(lines)
        })
    }

    /// Writes the quantity for one product; zero removes the line.
    pub fn set_cart_quantity(&self, product_id: u32, quantity: u32) -> Result<()> {
        self.with_conn(|conn| {
            if quantity == 0 {
                conn.execute("DELETE FROM cart_items WHERE product_id = ?1", [product_id])?;
            } else {
                conn.execute(
                    "INSERT INTO cart_items (product_id, quantity) VALUES (?1, ?2)
                     ON CONFLICT(product_id) DO UPDATE SET quantity = excluded.quantity",
                    params![product_id, quantity],
                )?;
            }
            Ok(())
        })
    }

    pub fn clear_cart(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM cart_items", [])?;
            Ok(())
        })
    }
}

// My Farm Queries

impl Database {
    /// Returns false if the crop was already on the farm.
    pub fn add_farm_crop(&self, crop_id: u32) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO farm_crops (crop_id) VALUES (?1)",
                [crop_id],
            )?;
            Ok(inserted > 0)
        })
    }

    pub fn remove_farm_crop(&self, crop_id: u32) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM farm_crops WHERE crop_id = ?1", [crop_id])?;
            Ok(())
        })
    }

    pub fn get_farm_crops(&self) -> Result<Vec<u32>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT crop_id FROM farm_crops ORDER BY added_at, crop_id")?;
            let ids = stmt
                .query_map([], |row| row.get(0))?
                .filter_map(readable_row)
                .collect();
            Ok(ids)
        })
    }
}

// Chat Queries

impl Database {
    pub fn save_chat_message(&self, message: &ChatMessage) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chat_messages (sender, body, sent_at) VALUES (?1, ?2, ?3)",
                params![
                    message.sender.as_str(),
                    message.body,
                    message.sent_at.to_rfc3339()
                ],
            )?;
            Ok(())
        })
    }

    /// The most recent `limit` messages, oldest first.
    pub fn recent_chat_messages(&self, limit: usize) -> Result<Vec<ChatMessage>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT sender, body, sent_at FROM chat_messages ORDER BY id DESC LIMIT ?1",
            )?;
            let mut messages: Vec<ChatMessage> = stmt
                .query_map([limit as i64], row_to_chat_message)?
                .filter_map(readable_row)
                .flatten()
                .collect();
            messages.reverse();
            Ok(messages)
        })
    }
}

/// Drops a row that failed to decode, keeping the failure in the log.
fn readable_row<T>(row: rusqlite::Result<T>) -> Option<T> {
    row.inspect_err(|e| warn!(error = %e, "Skipping unreadable row"))
        .ok()
}

fn row_to_chat_message(row: &Row) -> rusqlite::Result<Option<ChatMessage>> {
    let sender_str: String = row.get("sender")?;
    let sent_at_str: String = row.get("sent_at")?;

    let Some(sender) = Sender::from_str(&sender_str) else {
        warn!(sender = %sender_str, "Unknown chat sender in database, skipping message");
        return Ok(None);
    };

    Ok(Some(ChatMessage {
        sender,
        body: row.get("body")?,
        sent_at: parse_timestamp(&sent_at_str),
    }))
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
