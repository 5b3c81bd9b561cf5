use std::path::Path;

fn main() {
    let matrix_path = Path::new("data/MATCH");
    validate_matrix_file(matrix_path);
    set_build_dependencies();
}

fn validate_matrix_file(matrix_path: &Path) {
    // Ensure the embedded matrix exists at build time
    assert!(
        matrix_path.exists(),
        "\n\nMATRIX BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the scoring matrix before building.\n",
        matrix_path.display()
    );

    let contents = std::fs::read_to_string(matrix_path).unwrap_or_else(|e| {
        panic!(
            "\n\nMATRIX BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            matrix_path.display()
        );
    });

    let mut lines = contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    let header: Vec<&str> = lines
        .next()
        .unwrap_or_else(|| panic!("\n\nMATRIX BUILD ERROR: Missing header line\n"))
        .split_whitespace()
        .collect();

    for symbol in &header {
        assert!(
            symbol.len() == 1,
            "\n\nMATRIX BUILD ERROR: Header symbol '{symbol}' must be a single character\n"
        );
        assert!(
            *symbol != "-",
            "\n\nMATRIX BUILD ERROR: '-' is reserved for alignment gaps\n"
        );
    }

    let rows = validate_rows(lines, &header);

    println!(
        "cargo:warning=Validated scoring matrix: {} residues, {rows} rows",
        header.len()
    );
}

fn validate_rows<'a>(lines: impl Iterator<Item = &'a str>, header: &[&str]) -> usize {
    let mut rows = 0;

    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let label = fields[0];

        assert!(
            header.contains(&label),
            "\n\nMATRIX BUILD ERROR: Row label '{label}' is not in the header\n"
        );
        assert!(
            fields.len() == header.len() + 1,
            "\n\nMATRIX BUILD ERROR: Row '{label}' has {} scores, expected {}\n",
            fields.len() - 1,
            header.len()
        );

        for value in &fields[1..] {
            assert!(
                value.parse::<i32>().is_ok(),
                "\n\nMATRIX BUILD ERROR: Row '{label}' has non-integer score '{value}'\n"
            );
        }

        rows += 1;
    }

    assert!(
        rows == header.len(),
        "\n\nMATRIX BUILD ERROR: {rows} rows for {} columns\n\
         The matrix must be square.\n",
        header.len()
    );

    rows
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the matrix changes
    println!("cargo:rerun-if-changed=data/MATCH");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
