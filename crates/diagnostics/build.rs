//! Turns `tables/diagnostics.jsonc` into `generated_codes.rs` (one constant
//! per code) and `generated_explain.rs` (code to description lookup).

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;
use std::{env, fs};

use rtf2rtf_jsonc_strip::strip_jsonc;

struct Entry {
    id: String,
    const_name: String,
    summary: String,
    description: String,
}

fn main() {
    let table_path = Path::new("tables/diagnostics.jsonc");
    println!("cargo:rerun-if-changed={}", table_path.display());

    let raw = fs::read_to_string(table_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", table_path.display()));
    let table: serde_json::Value = serde_json::from_str(&strip_jsonc(&raw))
        .unwrap_or_else(|e| panic!("{} is not valid JSONC: {e}", table_path.display()));
    let entries = read_entries(&table);

    let mut codes = String::from("// Generated from tables/diagnostics.jsonc. DO NOT EDIT.\n\n");
    let mut explain = String::from("match id {\n");
    for e in &entries {
        let _ = writeln!(codes, "/// {}\npub const {}: &str = \"{}\";\n", e.summary, e.const_name, e.id);
        let _ = writeln!(explain, "    \"{}\" => Some(\"{}\"),", e.id, e.description.escape_default());
    }
    explain.push_str("    _ => None,\n}\n");

    let out_dir = env::var_os("OUT_DIR").expect("cargo sets OUT_DIR");
    let out_dir = Path::new(&out_dir);
    fs::write(out_dir.join("generated_codes.rs"), codes).expect("write generated_codes.rs");
    fs::write(out_dir.join("generated_explain.rs"), explain).expect("write generated_explain.rs");
}

fn read_entries(table: &serde_json::Value) -> Vec<Entry> {
    let list = table["diagnostics"]
        .as_array()
        .expect("diagnostics.jsonc: expected a `diagnostics` array");

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    list.iter()
        .enumerate()
        .map(|(i, item)| {
            let field = |key: &str| {
                item[key]
                    .as_str()
                    .unwrap_or_else(|| panic!("diagnostics[{i}]: missing `{key}`"))
                    .to_owned()
            };
            let entry = Entry {
                id: field("id"),
                const_name: field("constName"),
                summary: field("summary"),
                description: field("description"),
            };
            assert!(is_code(&entry.id), "diagnostics[{i}]: id `{}` is not RTFnnnn", entry.id);
            assert!(
                is_const_name(&entry.const_name),
                "diagnostics[{i}]: constName `{}` is not SCREAMING_SNAKE_CASE",
                entry.const_name
            );
            assert!(ids.insert(entry.id.clone()), "duplicate id `{}`", entry.id);
            assert!(
                names.insert(entry.const_name.clone()),
                "duplicate constName `{}`",
                entry.const_name
            );
            entry
        })
        .collect()
}

fn is_code(id: &str) -> bool {
    id.len() == 7 && id.starts_with("RTF") && id[3..].bytes().all(|b| b.is_ascii_digit())
}

fn is_const_name(name: &str) -> bool {
    name.bytes().next().is_some_and(|b| b.is_ascii_uppercase())
        && name
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}
