use chrono::NaiveDateTime;

pub const INDONESIAN_HEADER: &str = "🇮🇩 HASIL TERJEMAHAN (INDONESIA):";
pub const ENGLISH_HEADER: &str = "🇺🇸 TRANSLATION RESULT (ENGLISH):";
pub const JAPANESE_HEADER: &str = "🇯🇵 翻訳結果 (日本語):";

/// Canned translation keyed by target code (`id`, `en`, `ja`).
/// Unknown targets get `Translation to <to>:\n\n<text>`.
pub fn translate(text: &str, from: &str, to: &str, generated: NaiveDateTime) -> String {
    let date = generated.format("%Y-%m-%d %H:%M:%S");
    match to {
        "id" => format!(
            "{INDONESIAN_HEADER}
{text}

📅 Tanggal: {date}
🔤 Bahasa Sumber: {from}
🎯 Bahasa Target: {to}

💬 Catatan:
Ini adalah hasil terjemahan simulasi dari server Biker OCR.
Untuk terjemahan real-time, gunakan API seperti Google Translate."
        ),
        "en" => format!(
            "{ENGLISH_HEADER}
{text}

📅 Date: {date}
🔤 Source Language: {from}
🎯 Target Language: {to}

💬 Note:
This is a simulated translation from the Biker OCR server.
For real-time translation, use API like Google Translate."
        ),
        "ja" => format!(
            "{JAPANESE_HEADER}
{text}

📅 日付: {date}
🔤 ソース言語: {from}
🎯 ターゲット言語: {to}

💬 注記:
これはBiker OCRサーバーからのシミュレーション翻訳です。
リアルタイム翻訳にはGoogle Translate APIなどを使用してください。"
        ),
        other => format!("Translation to {other}:\n\n{text}"),
    }
}
