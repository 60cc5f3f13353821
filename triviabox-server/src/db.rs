//! SQLite storage for the trivia service
//!
//! A single connection behind a mutex, schema applied at open. The six
//! canonical categories are seeded when the table is empty, so a fresh
//! database can serve the category listing immediately.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};

use crate::error::ApiResult;
use crate::models::{Category, CategoryMap, Question};

/// Thread-safe database wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ApiResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::init(Connection::open(&path)?)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ApiResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> ApiResult<Self> {
        conn.execute_batch(SCHEMA)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.seed_default_categories()?;
        Ok(db)
    }

    /// Insert the canonical categories if the table is empty.
    fn seed_default_categories(&self) -> ApiResult<()> {
        let conn = self.conn.lock().unwrap();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;

        if count == 0 {
            for (id, kind) in DEFAULT_CATEGORIES {
                conn.execute(
                    "INSERT INTO categories (id, type) VALUES (?, ?)",
                    params![id, kind],
                )?;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Categories
    // ========================================================================

    pub fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    kind: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Categories as the `{id: type}` map the clients consume.
    pub fn category_map(&self) -> ApiResult<CategoryMap> {
        Ok(self
            .list_categories()?
            .into_iter()
            .map(|c| (c.id, c.kind))
            .collect())
    }

    // ========================================================================
    // Questions
    // ========================================================================

    /// Every question, in id order. Pagination slices this in memory.
    pub fn list_questions(&self) -> ApiResult<Vec<Question>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )?;

        let questions = stmt
            .query_map([], question_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(questions)
    }

    pub fn questions_in_category(&self, category: i64) -> ApiResult<Vec<Question>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, category, difficulty
             FROM questions WHERE category = ? ORDER BY id",
        )?;

        let questions = stmt
            .query_map([category], question_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(questions)
    }

    /// Case-insensitive substring match on the question text.
    pub fn search_questions(&self, term: &str) -> ApiResult<Vec<Question>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, category, difficulty
             FROM questions WHERE question LIKE ? ORDER BY id",
        )?;

        let pattern = format!("%{}%", term);
        let questions = stmt
            .query_map([pattern], question_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(questions)
    }

    pub fn insert_question(
        &self,
        question: &str,
        answer: &str,
        category: i64,
        difficulty: i64,
    ) -> ApiResult<Question> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES (?, ?, ?, ?)",
            params![question, answer, category, difficulty],
        )?;

        Ok(Question {
            id: conn.last_insert_rowid(),
            question: question.to_owned(),
            answer: answer.to_owned(),
            category,
            difficulty,
        })
    }

    /// Delete a question. Returns false when no row matched the id.
    pub fn delete_question(&self, id: i64) -> ApiResult<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM questions WHERE id = ?", [id])?;
        Ok(affected > 0)
    }
}

fn question_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        category: row.get(3)?,
        difficulty: row.get(4)?,
    })
}

const SCHEMA: &str = r#"
-- Topical groupings
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    type TEXT NOT NULL
);

-- Quiz items, each scoped to one category
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    category INTEGER NOT NULL REFERENCES categories(id),
    difficulty INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category);
"#;

const DEFAULT_CATEGORIES: &[(i64, &str)] = &[
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_canonical_categories() {
        let db = Database::open_in_memory().unwrap();
        let categories = db.list_categories().unwrap();

        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].kind, "Science");
        assert_eq!(categories[5].kind, "Sports");
    }

    #[test]
    fn insert_and_list_questions() {
        let db = Database::open_in_memory().unwrap();

        let q = db
            .insert_question("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1)
            .unwrap();
        assert!(q.id > 0);

        let all = db.list_questions().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].answer, "Muhammad Ali");
    }

    #[test]
    fn search_is_case_insensitive() {
        let db = Database::open_in_memory().unwrap();
        db.insert_question("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2)
            .unwrap();

        let hits = db.search_questions("CAGED").unwrap();
        assert_eq!(hits.len(), 1);

        let misses = db.search_questions("volcano").unwrap();
        assert!(misses.is_empty());
    }

    #[test]
    fn questions_in_category_filters() {
        let db = Database::open_in_memory().unwrap();
        db.insert_question("What is the heaviest organ in the human body?", "The Liver", 1, 4)
            .unwrap();
        db.insert_question("La Giaconda is better known as what?", "Mona Lisa", 2, 3)
            .unwrap();

        let science = db.questions_in_category(1).unwrap();
        assert_eq!(science.len(), 1);
        assert_eq!(science[0].category, 1);

        assert!(db.questions_in_category(6).unwrap().is_empty());
    }

    #[test]
    fn delete_question_reports_missing_rows() {
        let db = Database::open_in_memory().unwrap();
        let q = db
            .insert_question("In what year was the first Tour de France?", "1903", 6, 4)
            .unwrap();

        assert!(db.delete_question(q.id).unwrap());
        assert!(!db.delete_question(q.id).unwrap());
        assert!(!db.delete_question(777_777).unwrap());
    }
}
