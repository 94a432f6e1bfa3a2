use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bookstore(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookstore").unwrap();
    cmd.env("BOOKSTORE_DATA_DIR", data_dir);
    cmd
}

fn backup_count(data_dir: &Path) -> usize {
    let dir = data_dir.join("backups");
    if !dir.exists() {
        return 0;
    }
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("backup_"))
        .count()
}

fn add(data_dir: &Path, title: &str, author: &str, year: &str, price: &str) {
    bookstore(data_dir)
        .args(["add", title, author, year, price])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book added!"));
}

#[test]
fn add_list_delete() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    add(dir, "Dom Casmurro", "Machado de Assis", "1899", "39.90");
    add(dir, "A Hora da Estrela", "Clarice Lispector", "1977", "25");
    add(dir, "Memorias Postumas", "Machado de Assis", "1881", "42.5");

    bookstore(dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dom Casmurro"))
        .stdout(predicate::str::contains("Total: 3 book(s)"));

    bookstore(dir)
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book deleted!"));

    bookstore(dir)
        .args(["search", "Machado"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 book(s)"))
        .stdout(predicate::str::contains("Clarice").not());

    assert_eq!(backup_count(dir), 4);
}

#[test]
fn missing_id_is_reported_not_failed() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    bookstore(dir)
        .args(["update-price", "42", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book not found."));

    bookstore(dir)
        .args(["delete", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book not found."));
}

#[test]
fn invalid_number_fails_without_backup() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    bookstore(dir)
        .args(["add", "Title", "Author", "soon", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid year"));

    bookstore(dir)
        .args(["update-price", "one", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid book id"));

    assert_eq!(backup_count(dir), 0);
}

#[test]
fn non_finite_price_fails_without_backup() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    bookstore(dir)
        .args(["add", "Title", "Author", "2000", "nan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price"));
    assert_eq!(backup_count(dir), 0);

    add(dir, "Title", "Author", "2000", "10");
    bookstore(dir)
        .args(["update-price", "1", "inf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price"));
    assert_eq!(backup_count(dir), 1);
}

#[test]
fn data_dir_flag_overrides_environment() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    bookstore(env_dir.path())
        .arg("--data-dir")
        .arg(flag_dir.path())
        .args(["add", "Flagged", "Author", "2000", "1"])
        .assert()
        .success();

    assert!(flag_dir.path().join("data").join("livraria.db").exists());
    assert!(!env_dir.path().join("data").exists());
}

#[test]
fn negative_price_is_accepted() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    add(dir, "Refund", "Nobody", "2020", "-5");

    bookstore(dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("-5"));
}

#[test]
fn retention_keeps_five_backups() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    add(dir, "Book", "Author", "2000", "1");
    for price in ["2", "3", "4", "5", "6", "7"] {
        bookstore(dir)
            .args(["update-price", "1", price])
            .assert()
            .success();
    }

    assert_eq!(backup_count(dir), 5);

    bookstore(dir).args(["backup", "prune"]).assert().success();
    assert_eq!(backup_count(dir), 5);
}

#[test]
fn export_empty_catalog() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    bookstore(dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books to export."));

    assert!(!dir.join("exports").join("livros.csv").exists());
    assert_eq!(backup_count(dir), 0);
}

#[test]
fn export_import_round_trip() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    add(source.path(), "Dom Casmurro", "Machado de Assis", "1899", "39.9");
    add(source.path(), "Title, with comma", "Author", "2001", "10");

    bookstore(source.path()).arg("export").assert().success();
    let csv_path = source.path().join("exports").join("livros.csv");
    let contents = fs::read_to_string(&csv_path).unwrap();
    assert!(contents.starts_with("id,titulo,autor,ano_publicacao,preco"));
    assert!(contents.contains("\"Title, with comma\",Author,2001,10.0"));

    bookstore(target.path())
        .arg("import")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 book(s) imported."));
    assert_eq!(backup_count(target.path()), 1);

    bookstore(target.path())
        .arg("export")
        .assert()
        .success();
    let reexported =
        fs::read_to_string(target.path().join("exports").join("livros.csv")).unwrap();
    assert_eq!(reexported, contents);

    // Every id now collides
    bookstore(target.path())
        .arg("import")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 book(s) imported."));
}

#[test]
fn import_missing_file_fails_without_backup() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    bookstore(dir)
        .arg("import")
        .arg(dir.join("missing.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));

    assert_eq!(backup_count(dir), 0);
}

#[test]
fn manual_backup_and_restore() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    add(dir, "Kept", "Author", "2000", "1");
    bookstore(dir)
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created"));
    add(dir, "Discarded", "Author", "2001", "2");

    // Without --force nothing changes
    bookstore(dir)
        .args(["backup", "restore", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    bookstore(dir)
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore complete!"));

    bookstore(dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept"))
        .stdout(predicate::str::contains("Discarded").not());
}

#[test]
fn interactive_menu() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    bookstore(dir)
        .arg("menu")
        .write_stdin("1\nDom Casmurro\nMachado de Assis\n1899\n39.90\n5\nassis\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Book added with ID 1!"))
        .stdout(predicate::str::contains("Dom Casmurro"))
        .stdout(predicate::str::contains("Goodbye!"));
}
