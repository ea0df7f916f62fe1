use std::path::Path;

const MAX_FILENAME_BYTES: usize = 200;

/// Replace characters that are unsafe in a file name on common filesystems.
///
/// Long names are shortened in the stem so the extension survives.
pub fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'], "_");
    if name.len() <= MAX_FILENAME_BYTES {
        return name;
    }

    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot < MAX_FILENAME_BYTES => name.split_at(dot),
        _ => (name.as_str(), ""),
    };

    let mut cut = MAX_FILENAME_BYTES - ext.len();
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &stem[..cut], ext)
}

/// Name for the `n`th collision of `name`: `report.pdf` becomes `report_n.pdf`.
///
/// `n == 0` returns the name unchanged.
pub fn numbered_name(name: &str, n: usize) -> String {
    if n == 0 {
        return name.to_string();
    }

    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());

    match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    }
}

/// First name in `name`, `name_1`, `name_2`, ... for which `taken` is false
pub fn unique_name<F>(name: &str, mut taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    let mut n = 0;
    loop {
        let candidate = numbered_name(name, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
