//! Mapper implementations for the persisted entities.

use crate::mapper::{Entity, TableSchema};
use quill_types::models::{Blog, Comment, User};
use rusqlite::Row;
use rusqlite::types::Value;

static USERS: TableSchema = TableSchema {
    table: "users",
    columns: &["id", "email", "name", "password", "image", "admin", "created_at"],
    primary_key: "id",
};

static BLOGS: TableSchema = TableSchema {
    table: "blogs",
    columns: &["id", "user_id", "user_name", "user_image", "name", "summary", "content", "created_at"],
    primary_key: "id",
};

static COMMENTS: TableSchema = TableSchema {
    table: "comments",
    columns: &["id", "blog_id", "user_id", "user_name", "user_image", "content", "created_at"],
    primary_key: "id",
};

impl Entity for User {
    fn schema() -> &'static TableSchema {
        &USERS
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            password: row.get(3)?,
            image: row.get(4)?,
            admin: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.clone()),
            Value::from(self.email.clone()),
            Value::from(self.name.clone()),
            Value::from(self.password.clone()),
            Value::from(self.image.clone()),
            Value::from(self.admin),
            Value::from(self.created_at),
        ]
    }
}

impl Entity for Blog {
    fn schema() -> &'static TableSchema {
        &BLOGS
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            user_name: row.get(2)?,
            user_image: row.get(3)?,
            name: row.get(4)?,
            summary: row.get(5)?,
            content: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.clone()),
            Value::from(self.user_id.clone()),
            Value::from(self.user_name.clone()),
            Value::from(self.user_image.clone()),
            Value::from(self.name.clone()),
            Value::from(self.summary.clone()),
            Value::from(self.content.clone()),
            Value::from(self.created_at),
        ]
    }
}

impl Entity for Comment {
    fn schema() -> &'static TableSchema {
        &COMMENTS
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            blog_id: row.get(1)?,
            user_id: row.get(2)?,
            user_name: row.get(3)?,
            user_image: row.get(4)?,
            content: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id.clone()),
            Value::from(self.blog_id.clone()),
            Value::from(self.user_id.clone()),
            Value::from(self.user_name.clone()),
            Value::from(self.user_image.clone()),
            Value::from(self.content.clone()),
            Value::from(self.created_at),
        ]
    }
}
