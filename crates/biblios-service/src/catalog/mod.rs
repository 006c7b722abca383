//! Catalog management: authors, genres, and books.

pub mod author;
pub mod book;
pub mod genre;

pub use author::AuthorService;
pub use book::BookService;
pub use genre::GenreService;
