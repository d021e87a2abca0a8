//! Domain query helpers built on the generic mapper.

use crate::Database;
use anyhow::Result;
use quill_types::models::{Blog, Comment, User};
use rusqlite::types::Value;

impl Database {
    // -- Users --

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.find_all::<User>(
            Some("email = ?"),
            &[Value::from(email.to_string())],
            None,
            None,
        )?;
        Ok(users.into_iter().next())
    }

    // -- Blogs --

    pub fn blog_count(&self) -> Result<u64> {
        self.count::<Blog>(None, &[])
    }

    pub fn latest_blogs(&self) -> Result<Vec<Blog>> {
        self.find_all::<Blog>(None, &[], Some("created_at DESC"), None)
    }

    pub fn blogs_page(&self, offset: u64, limit: u64) -> Result<Vec<Blog>> {
        self.find_all::<Blog>(None, &[], Some("created_at DESC"), Some((offset, limit)))
    }

    // -- Comments --

    pub fn comment_count(&self) -> Result<u64> {
        self.count::<Comment>(None, &[])
    }

    pub fn comments_for_blog(&self, blog_id: &str) -> Result<Vec<Comment>> {
        self.find_all::<Comment>(
            Some("blog_id = ?"),
            &[Value::from(blog_id.to_string())],
            Some("created_at DESC"),
            None,
        )
    }

    pub fn comments_page(&self, offset: u64, limit: u64) -> Result<Vec<Comment>> {
        self.find_all::<Comment>(None, &[], Some("created_at DESC"), Some((offset, limit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_types::models::next_id;

    fn user(email: &str) -> User {
        User {
            id: next_id(),
            email: email.to_string(),
            name: "Tester".to_string(),
            password: "deadbeef".to_string(),
            image: "about:blank".to_string(),
            admin: false,
            created_at: 1_700_000_000.0,
        }
    }

    fn blog(name: &str, created_at: f64) -> Blog {
        Blog {
            id: next_id(),
            user_id: "u1".to_string(),
            user_name: "Tester".to_string(),
            user_image: "about:blank".to_string(),
            name: name.to_string(),
            summary: "a summary".to_string(),
            content: "some *markdown*".to_string(),
            created_at,
        }
    }

    fn comment(blog_id: &str, content: &str, created_at: f64) -> Comment {
        Comment {
            id: next_id(),
            blog_id: blog_id.to_string(),
            user_id: "u1".to_string(),
            user_name: "Tester".to_string(),
            user_image: "about:blank".to_string(),
            content: content.to_string(),
            created_at,
        }
    }

    #[test]
    fn insert_then_find_by_id_round_trips() {
        let db = Database::open_in_memory().unwrap();
        let u = user("a@b.com");
        assert_eq!(db.insert(&u).unwrap(), 1);

        let found: User = db.find_by_id(&u.id).unwrap().unwrap();
        assert_eq!(found.email, "a@b.com");
        assert!(!found.admin);

        let missing: Option<User> = db.find_by_id("nope").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn update_and_delete_report_affected_rows() {
        let db = Database::open_in_memory().unwrap();
        let mut u = user("a@b.com");
        db.insert(&u).unwrap();

        u.name = "Renamed".to_string();
        assert_eq!(db.update(&u).unwrap(), 1);
        let found: User = db.find_by_id(&u.id).unwrap().unwrap();
        assert_eq!(found.name, "Renamed");

        assert_eq!(db.delete::<User>(&u.id).unwrap(), 1);
        // Zero-affected is not an error.
        assert_eq!(db.delete::<User>(&u.id).unwrap(), 0);
    }

    #[test]
    fn user_by_email_matches_exactly() {
        let db = Database::open_in_memory().unwrap();
        db.insert(&user("a@b.com")).unwrap();
        db.insert(&user("c@d.com")).unwrap();

        assert!(db.user_by_email("a@b.com").unwrap().is_some());
        assert!(db.user_by_email("x@y.com").unwrap().is_none());
    }

    #[test]
    fn blogs_page_orders_newest_first() {
        let db = Database::open_in_memory().unwrap();
        for i in 0..25 {
            db.insert(&blog(&format!("post {i}"), 1000.0 + f64::from(i))).unwrap();
        }
        assert_eq!(db.blog_count().unwrap(), 25);

        let first = db.blogs_page(0, 10).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].name, "post 24");

        let last = db.blogs_page(20, 10).unwrap();
        assert_eq!(last.len(), 5);
        assert_eq!(last[4].name, "post 0");
    }

    #[test]
    fn comments_for_blog_filters_and_orders_newest_first() {
        let db = Database::open_in_memory().unwrap();
        db.insert(&comment("b1", "older", 100.0)).unwrap();
        db.insert(&comment("b1", "newer", 200.0)).unwrap();
        db.insert(&comment("b2", "other blog", 300.0)).unwrap();

        let comments = db.comments_for_blog("b1").unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "newer");
        assert_eq!(comments[1].content, "older");
    }
}
