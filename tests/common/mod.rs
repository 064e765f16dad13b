#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Writes `<root>/<name>/data.context` and one `languages/<code>.txt` per entry.
pub fn write_concept(root: &Path, name: &str, relation: &str, languages: &[(&str, &str)]) {
    let dir = root.join(name);
    fs::create_dir_all(dir.join("languages")).expect("create concept dirs");
    fs::write(dir.join("data.context"), relation).expect("write relation");
    for (code, labels) in languages {
        fs::write(dir.join("languages").join(format!("{code}.txt")), labels)
            .expect("write label file");
    }
}

/// Creates `data/` and `contexts/` under `root` and returns both paths.
pub fn source_and_dest(root: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let source = root.join("data");
    let dest = root.join("contexts");
    fs::create_dir_all(&source).expect("create source root");
    fs::create_dir_all(&dest).expect("create destination");
    (source, dest)
}

/// Lists file names in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
