use std::path::PathBuf;

/// Well-known directories used by tidyframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

/// Resolves the per-user config and data directories.
///
/// Falls back to the current directory when the platform reports none.
pub fn standard_paths() -> StandardPaths {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tidyframe");
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tidyframe");
    let log_dir = data_dir.join("logs");
    StandardPaths {
        config_dir,
        data_dir,
        log_dir,
    }
}

/// Formats an optional f64 to 4 decimal places, or returns "-" if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => "-".to_owned(),
    }
}

/// Pads each cell so the columns of a plain-text table line up.
pub fn render_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    let mut out = line(header);
    for row in rows {
        out.push('\n');
        out.push_str(&line(row));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(1.23456)), "1.2346");
        assert_eq!(fmt_opt(None), "-");
        assert_eq!(fmt_opt(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_standard_paths_nest_under_app_dir() {
        let paths = standard_paths();
        assert!(paths.config_dir.ends_with("tidyframe"));
        assert!(paths.log_dir.starts_with(&paths.data_dir));
    }

    #[test]
    fn test_render_grid_aligns_columns() {
        let header = vec!["name".to_owned(), "n".to_owned()];
        let rows = vec![
            vec!["a".to_owned(), "100".to_owned()],
            vec!["longer".to_owned(), "2".to_owned()],
        ];
        assert_eq!(
            render_grid(&header, &rows),
            "name    n\na       100\nlonger  2"
        );
    }
}
