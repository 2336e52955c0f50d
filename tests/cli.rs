//! End-to-end tests for the `pdfselect` binary.

use assert_cmd::Command;
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("pdfselect").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a PDF whose page `n` shows "Page n".
fn write_pdf(dir: &Path, name: &str, num_pages: u32) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (1..=num_pages)
        .map(|n| {
            let content = format!("BT /F1 12 Tf 72 720 Td (Page {}) Tj ET", n);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
                "Contents" => Object::Reference(content_id),
            }))
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => num_pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

fn page_texts(path: &Path) -> Vec<String> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let content = String::from_utf8(doc.get_page_content(id).unwrap()).unwrap();
            content.split(['(', ')']).nth(1).unwrap().to_string()
        })
        .collect()
}

#[test]
fn print_only_prints_expansion_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(dir.path(), "doc.pdf", 10);

    cmd()
        .arg(&input)
        .arg("5-7,3,10-8:-1")
        .arg("--print-only")
        .assert()
        .success()
        .stdout("5,6,7,3,10,9,8\n");

    assert!(!dir.path().join("doc.selected.pdf").exists());
}

#[test]
fn extracts_to_default_output() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(dir.path(), "doc.pdf", 10);
    let expected = dir.path().join("doc.selected.pdf");

    cmd()
        .arg(&input)
        .arg("range(9, 7, -1) 1,1")
        .assert()
        .success()
        .stdout(format!("9,8,7,1,1\nWrote: {}\n", expected.display()));

    assert_eq!(
        page_texts(&expected),
        ["Page 9", "Page 8", "Page 7", "Page 1", "Page 1"]
    );
}

#[test]
fn default_output_skips_taken_names() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(dir.path(), "doc.pdf", 3);
    std::fs::write(dir.path().join("doc.selected.pdf"), b"taken").unwrap();
    std::fs::write(dir.path().join("doc.selected-1.pdf"), b"taken").unwrap();

    cmd()
        .arg(&input)
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("doc.selected-2.pdf\n"));

    assert_eq!(page_texts(&dir.path().join("doc.selected-2.pdf")), ["Page 2"]);
}

#[test]
fn explicit_output_creates_directories() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(dir.path(), "doc.pdf", 5);
    let output = dir.path().join("a/b/picked.pdf");

    cmd()
        .arg(&input)
        .arg("5..1..-2")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote: "));

    assert_eq!(page_texts(&output), ["Page 5", "Page 3", "Page 1"]);
}

#[test]
fn out_of_bounds_fails_with_one_line() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(dir.path(), "doc.pdf", 50);

    cmd()
        .arg(&input)
        .arg("9-53:4")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("page 53 out of bounds (total pages: 50)"))
        .stderr(predicate::function(|s: &str| s.lines().count() == 1));

    assert!(!dir.path().join("doc.selected.pdf").exists());
}

#[test]
fn rejects_invalid_expressions() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(dir.path(), "doc.pdf", 10);

    for (pages, message) in [
        ("0-5", "page numbers must be positive"),
        ("5-3", "does not progress from 5 to 3"),
        ("range(1,5,0)", "range step 0 does not progress"),
        ("1,x", "invalid page token `x`"),
        (" , ", "pages expression cannot be empty"),
    ] {
        cmd()
            .arg(&input)
            .arg(pages)
            .arg("--print-only")
            .assert()
            .failure()
            .stderr(predicate::str::contains(message));
    }
}

#[test]
fn missing_input_fails_before_parsing() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg(dir.path().join("missing.pdf"))
        .arg("not-an-expression")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn corrupt_input_fails_with_one_line() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.pdf");
    std::fs::write(&input, b"not a pdf").unwrap();

    cmd()
        .arg(&input)
        .arg("1")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Failed to open PDF"))
        .stderr(predicate::str::contains("bad.pdf"))
        .stderr(predicate::function(|s: &str| s.lines().count() == 1));
}

#[test]
fn unwritable_output_fails_with_one_line() {
    let dir = TempDir::new().unwrap();
    let input = write_pdf(dir.path(), "doc.pdf", 3);
    let blocker = dir.path().join("file.txt");
    std::fs::write(&blocker, b"a regular file").unwrap();
    let output = blocker.join("out.pdf");

    cmd()
        .arg(&input)
        .arg("1")
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains(blocker.display().to_string()))
        .stderr(predicate::function(|s: &str| s.lines().count() == 1));

    assert!(!output.exists());
}
