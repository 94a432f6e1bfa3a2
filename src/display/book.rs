//! Book display formatting
//!
//! Formats books for terminal output in table and detail views.

use crate::models::Book;

/// Format a list of books as a table
///
/// `empty_message` is returned as-is when there is nothing to show.
pub fn format_book_list(books: &[Book], empty_message: &str) -> String {
    if books.is_empty() {
        return empty_message.to_string();
    }

    let id_width = books
        .iter()
        .map(|b| b.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let title_width = books
        .iter()
        .map(|b| b.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let author_width = books
        .iter()
        .map(|b| b.author.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>id_width$}  {:<title_width$}  {:<author_width$}  {:>6}  {:>10}\n",
        "ID",
        "Title",
        "Author",
        "Year",
        "Price",
        id_width = id_width,
        title_width = title_width,
        author_width = author_width,
    ));

    output.push_str(&format!(
        "{:->id_width$}  {:-<title_width$}  {:-<author_width$}  {:->6}  {:->10}\n",
        "",
        "",
        "",
        "",
        "",
        id_width = id_width,
        title_width = title_width,
        author_width = author_width,
    ));

    for book in books {
        output.push_str(&format!(
            "{:>id_width$}  {:<title_width$}  {:<author_width$}  {:>6}  {:>10}\n",
            book.id,
            book.title,
            book.author,
            book.year,
            book.price,
            id_width = id_width,
            title_width = title_width,
            author_width = author_width,
        ));
    }

    output.push_str(&format!("\nTotal: {} book(s)\n", books.len()));
    output
}

/// Format a single book with all its fields
pub fn format_book_details(book: &Book) -> String {
    format!(
        "Book #{}\n  Title:  {}\n  Author: {}\n  Year:   {}\n  Price:  {}\n",
        book.id, book.title, book.author, book.year, book.price
    )
}
