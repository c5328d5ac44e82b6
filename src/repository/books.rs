//! Books repository: books table plus the book_authors junction table.
//!
//! The Book->Author association is the single source of truth. Every write
//! that touches a book together with its junction rows runs inside one
//! transaction so a partial failure leaves the store unchanged.

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all books with their authors, in insertion order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let mut books = sqlx::query_as::<_, Book>("SELECT id, title, isbn FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        for book in &mut books {
            book.authors = self.get_book_authors(book.id).await?;
        }

        Ok(books)
    }

    /// Get a book by ID with its authors loaded
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let mut book =
            sqlx::query_as::<_, Book>("SELECT id, title, isbn FROM books WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("No result found for book with ID: {}", id))
                })?;

        book.authors = self.get_book_authors(book.id).await?;

        Ok(book)
    }

    /// List all books referencing an author (existence of the author is the
    /// service's concern)
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let mut books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.title, b.isbn
            FROM books b
            JOIN book_authors ba ON ba.book_id = b.id
            WHERE ba.author_id = $1
            ORDER BY b.id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        for book in &mut books {
            book.authors = self.get_book_authors(book.id).await?;
        }

        Ok(books)
    }

    /// Load all authors for a book via the junction table, in position order
    pub async fn get_book_authors(&self, book_id: i32) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.first_name, a.last_name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = $1
            ORDER BY ba.position
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Count all books (used by tests and sanity checks)
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Create a book together with its junction rows in one transaction.
    /// Callers must pass already-resolved authors.
    pub async fn create(&self, title: &str, isbn: &str, authors: &[Author]) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO books (title, isbn) VALUES ($1, $2) RETURNING id",
        )
        .bind(title)
        .bind(isbn)
        .fetch_one(&mut *tx)
        .await?;

        sync_book_authors(&mut tx, id, authors).await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Update a book in one transaction. `None` fields keep their stored
    /// value; a present author slice (even empty) replaces the junction rows.
    pub async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        isbn: Option<&str>,
        authors: Option<&[Author]>,
    ) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = COALESCE($1::text, title),
                isbn = COALESCE($2::text, isbn)
            WHERE id = $3
            "#,
        )
        .bind(title)
        .bind(isbn)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No result found for book with ID: {}",
                id
            )));
        }

        if let Some(authors) = authors {
            sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sync_book_authors(&mut tx, id, authors).await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a book and its junction rows; authors are untouched
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No result found for book with ID: {}",
                id
            )));
        }

        tx.commit().await?;

        Ok(())
    }
}

/// Insert junction rows for a book, preserving the caller's author order
/// through the position column
async fn sync_book_authors(
    tx: &mut Transaction<'_, Postgres>,
    book_id: i32,
    authors: &[Author],
) -> AppResult<()> {
    for (idx, author) in authors.iter().enumerate() {
        sqlx::query(
            "INSERT INTO book_authors (book_id, author_id, position) VALUES ($1, $2, $3)",
        )
        .bind(book_id)
        .bind(author.id)
        .bind((idx + 1) as i16)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
