//! `.itermcolors` property list rendering.

use super::resolve::ResolvedColor;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
"#;

const FOOTER: &str = "</dict>\n</plist>\n";

/// Render resolved colors as an iTerm2 color preset.
///
/// Output depends only on the input sequence: components use fixed
/// six-decimal formatting and entries keep their input order.
pub fn render_plist(colors: &[ResolvedColor]) -> String {
    let mut out = String::with_capacity(HEADER.len() + FOOTER.len() + colors.len() * 320);
    out.push_str(HEADER);
    for color in colors {
        write_color(&mut out, color);
    }
    out.push_str(FOOTER);
    out
}

fn write_color(out: &mut String, color: &ResolvedColor) {
    let rgba = color.rgba;
    out.push_str(&format!(
        "  <key>{}</key>
  <dict>
    <key>Alpha Component</key>
    <real>{:.6}</real>
    <key>Blue Component</key>
    <real>{:.6}</real>
    <key>Color Space</key>
    <string>sRGB</string>
    <key>Green Component</key>
    <real>{:.6}</real>
    <key>Red Component</key>
    <real>{:.6}</real>
  </dict>
",
        escape_xml(color.slot),
        rgba.alpha,
        rgba.blue,
        rgba.green,
        rgba.red,
    ));
}

fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
