use std::path::Path;

use anyhow::{Context, Result, bail};

fn read_to_string(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

/// Velikost stránky v bajtech.
fn page_size() -> u64 {
    // Bezpečný fallback, kdyby sysconf selhal.
    let p = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if p <= 0 { 4096 } else { p as u64 }
}

/// Resident set size of this process in bytes, from /proc/self/statm.
pub fn resident_bytes() -> Result<u64> {
    let content =
        read_to_string(Path::new("/proc/self/statm")).context("read /proc/self/statm")?;
    let pages = parse_statm_resident(&content)?;
    Ok(pages * page_size())
}

/// proc(5): statm = size resident shared text lib data dt (v stránkách)
fn parse_statm_resident(content: &str) -> Result<u64> {
    let Some(field) = content.split_whitespace().nth(1) else {
        bail!("invalid statm content: {:?}", content);
    };

    field
        .parse::<u64>()
        .with_context(|| format!("parse statm resident field {:?}", field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resident_pages() {
        assert_eq!(parse_statm_resident("27182 25913 562 1 0 25770 0").unwrap(), 25913);
    }

    #[test]
    fn rejects_truncated_statm() {
        assert!(parse_statm_resident("27182").is_err());
        assert!(parse_statm_resident("").is_err());
    }

    #[test]
    fn rejects_non_numeric_resident() {
        let err = parse_statm_resident("1 x 2").unwrap_err();
        assert!(err.to_string().contains("resident"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn own_rss_is_nonzero() {
        assert!(resident_bytes().unwrap() > 0);
    }
}
