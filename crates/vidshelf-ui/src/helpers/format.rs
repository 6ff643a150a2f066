// crates/vidshelf-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in vidshelf-core.
//
// Time and duration formatting lives in vidshelf_core::helpers::time. This
// module only holds helpers for fitting text into a fixed amount of space.

/// Shortens a file name so it fits a list row `max_px` wide when drawn at
/// `font_px`. Row text is painted straight onto the painter, so this is an
/// estimate (a proportional glyph is roughly half its point size wide) rather
/// than a galley measurement. The extension is kept when there is room for it.
pub fn fit_label(text: &str, max_px: f32, font_px: f32) -> String {
    let glyph_px = (font_px * 0.55).max(1.0);
    let budget = (max_px / glyph_px).max(0.0) as usize;
    let len = text.chars().count();
    if len <= budget {
        return text.to_string();
    }
    if budget == 0 {
        return String::new();
    }

    // "long_na….mp4" reads better than "long_name_of_th…".
    let ext = text.rfind('.').map(|i| &text[i..]).filter(|e| e.chars().count() <= 5);
    match ext {
        Some(ext) if budget > ext.chars().count() + 2 => {
            let head = budget - ext.chars().count() - 1;
            text.chars().take(head).collect::<String>() + "…" + ext
        }
        _ => text.chars().take(budget - 1).collect::<String>() + "…",
    }
}

/// Returns the longest prefix of `s` that is at most `max` bytes and ends on
/// a char boundary. Used for context-menu headers and modal text.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    s.char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max)
        .last()
        .map(|i| &s[..i])
        .unwrap_or("")
}
