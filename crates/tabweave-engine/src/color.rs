//! Palette hashing

/// 32-bit string hash over UTF-16 code units (`h = h * 31 + unit`, wrapping)
pub fn hash_code(value: &str) -> i32 {
    value.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Palette entry for `key`, shifted by `offset`
///
/// # Examples
///
/// ```
/// use tabweave_engine::color::color_for_key;
/// use tabweave_engine::EngineConfig;
///
/// let palette = EngineConfig::default().palette;
/// let color = color_for_key("google.com", 0, &palette);
/// assert_eq!(color, color_for_key("google.com", 0, &palette));
/// assert_eq!(color_for_key("", 3, &palette), "orange");
/// ```
pub fn color_for_key(key: &str, offset: usize, palette: &[String]) -> String {
    if palette.is_empty() {
        return String::new();
    }
    let magnitude = i64::from(hash_code(key)).unsigned_abs();
    let index = (magnitude + offset as u64) % palette.len() as u64;
    palette[index as usize].clone()
}
