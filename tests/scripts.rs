use std::{fs, path::Path};

use lang_rs::{Session, WriteReporter};
use regex::Regex;
use walkdir::WalkDir;

struct Expectations {
    output: Vec<String>,
    errors: Vec<String>,
}

fn expectations(content: &str) -> Expectations {
    let expect_re = Regex::new(r"//\s*expect: (.*)").expect("regex should compile correctly");
    let error_re = Regex::new(r"//\s*error: (.*)").expect("regex should compile correctly");

    let collect = |re: &Regex| re
        .captures_iter(content)
        .map(|m| m.get(1).expect("comment should have a value").as_str().trim_end().to_string())
        .collect::<Vec<String>>();

    Expectations {
        output: collect(&expect_re),
        errors: collect(&error_re),
    }
}

fn run_script(path: &Path) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    let expected = expectations(&content);

    let mut session = Session::new(Vec::new(), WriteReporter::new(Vec::new()));
    session.run(&content).unwrap_or_else(|e| panic!("I/O failure running {:?}: {}", path, e));

    let output: Vec<String> = String::from_utf8_lossy(session.output())
        .lines()
        .map(str::to_string)
        .collect();
    let errors: Vec<String> = String::from_utf8_lossy(session.reporter().get_ref())
        .lines()
        .map(str::to_string)
        .collect();

    assert_eq!(expected.output, output, "output of {:?}", path);
    assert_eq!(expected.errors, errors, "diagnostics of {:?}", path);
}

#[test]
fn scripts_produce_expected_output() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("scripts");
    let mut count = 0;

    for entry in
        WalkDir::new(&root).sort_by(|a, b| a.file_name().cmp(b.file_name()))
                           .into_iter()
                           .filter_map(Result::ok)
                           .filter(|e| e.path().extension().map_or(false, |ext| ext == "lang"))
    {
        count += 1;
        run_script(entry.path());
    }

    assert!(count > 0, "No scripts found in {:?}", root);
}
