//! Catalog service: orchestrates lookups, existence checks and the
//! book/author relationship reconciliation.

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, AuthorRef, Book, CreateAuthor, CreateBook, PatchAuthor, PatchBook, ReplaceAuthor,
        ReplaceBook,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Get all authors of a book; fails if the book does not exist
    pub async fn get_authors_of_book(&self, book_id: i32) -> AppResult<Vec<Author>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.authors.list_by_book(book_id).await
    }

    /// Create a book; referenced author ids are reconciled all-or-nothing
    pub async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        let authors = self.resolve_authors(&data.authors).await?;
        self.repository
            .books
            .create(&data.title, &data.isbn, &authors)
            .await
    }

    /// Replace a book wholesale; fails if the book or any referenced author
    /// does not exist
    pub async fn replace_book(&self, data: &ReplaceBook) -> AppResult<Book> {
        self.repository.books.get_by_id(data.id).await?;
        let authors = self.resolve_authors(&data.authors).await?;
        self.repository
            .books
            .update(
                data.id,
                Some(data.title.as_str()),
                Some(data.isbn.as_str()),
                Some(authors.as_slice()),
            )
            .await
    }

    /// Merge a partial update into a book. Present fields replace stored
    /// values, absent fields are untouched. A present author list goes
    /// through reconciliation; present-but-empty clears all associations.
    pub async fn patch_book(&self, id: i32, data: &PatchBook) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await?;

        let authors = match &data.authors {
            Some(refs) => Some(self.resolve_authors(refs).await?),
            None => None,
        };

        self.repository
            .books
            .update(id, data.title.as_deref(), data.isbn.as_deref(), authors.as_deref())
            .await
    }

    /// Delete a book and its junction rows; does not cascade to authors
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.get_by_id(id).await?;
        self.repository.books.delete(id).await
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    /// List all authors
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get an author by ID
    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Get all books of an author; fails if the author does not exist
    pub async fn get_books_of_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        self.repository.authors.get_by_id(author_id).await?;
        self.repository.books.list_by_author(author_id).await
    }

    /// Create an author
    pub async fn create_author(&self, data: &CreateAuthor) -> AppResult<Author> {
        self.repository
            .authors
            .create(&data.first_name, &data.last_name)
            .await
    }

    /// Replace an author wholesale; fails if the author does not exist
    pub async fn replace_author(&self, data: &ReplaceAuthor) -> AppResult<Author> {
        self.repository.authors.get_by_id(data.id).await?;
        self.repository
            .authors
            .update(
                data.id,
                Some(data.first_name.as_str()),
                Some(data.last_name.as_str()),
            )
            .await
    }

    /// Merge a partial update into an author
    pub async fn patch_author(&self, id: i32, data: &PatchAuthor) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await?;
        self.repository
            .authors
            .update(id, data.first_name.as_deref(), data.last_name.as_deref())
            .await
    }

    /// Delete an author, detaching it from every referencing book first.
    /// Books left with zero authors are kept.
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.get_by_id(id).await?;
        self.repository.authors.delete_with_unlink(id).await
    }

    // =========================================================================
    // RECONCILIATION
    // =========================================================================

    /// Resolve a client-supplied set of author references to full records.
    /// Duplicate ids collapse to one; request order is preserved. If any id
    /// does not exist the whole operation fails and nothing is written.
    async fn resolve_authors(&self, refs: &[AuthorRef]) -> AppResult<Vec<Author>> {
        if refs.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<i32> = Vec::with_capacity(refs.len());
        for r in refs {
            if !ids.contains(&r.id) {
                ids.push(r.id);
            }
        }

        let fetched = self.repository.authors.get_by_ids(&ids).await?;
        if fetched.len() != ids.len() {
            return Err(AppError::NotFound("Some authors were not found".to_string()));
        }

        // ANY($1) does not preserve request order
        let mut resolved = Vec::with_capacity(ids.len());
        for id in &ids {
            let author = fetched
                .iter()
                .find(|a| a.id == *id)
                .cloned()
                .ok_or_else(|| AppError::NotFound("Some authors were not found".to_string()))?;
            resolved.push(author);
        }

        Ok(resolved)
    }
}
