pub mod rate_book;
