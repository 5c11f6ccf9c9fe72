/*
 * Responsibility
 * - ユーザー入力のテキストをクライアントに返しても安全な形にする
 * - title: 全てエスケープ (マークアップは一切通さない)
 * - description: ammonia の allowlist で危険な要素・属性だけ落とす (<strong> などは残す)
 *
 * 適用はレスポンス化の 1 箇所だけ (二重エスケープを避ける)
 */

/// `&`, `<`, `>` を実体参照に置き換える。引用符はテキストとしてそのまま残す
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// script / style は中身ごと、on* 属性や javascript: URL は属性ごと除去する
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_script_tags_in_title() {
        assert_eq!(
            escape_html(r#"Naughty naughty very naughty <script>alert("xss");</script>"#),
            r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#
        );
    }

    #[test]
    fn escapes_ampersands_before_other_entities() {
        assert_eq!(escape_html("a & <b>"), "a &amp; &lt;b&gt;");
        assert_eq!(escape_html("plain title"), "plain title");
    }

    #[test]
    fn strips_event_handlers_but_keeps_inline_markup() {
        let dirty = r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#;
        assert_eq!(
            clean_html(dirty),
            r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#
        );
    }

    #[test]
    fn drops_script_content_from_description() {
        assert_eq!(clean_html("ok<script>alert(1)</script>"), "ok");
    }
}
