use chrono::NaiveDateTime;
use serde::Serialize;

pub const CONFIDENCE: f64 = 96.2;
pub const SERVER_LABEL: &str = "Rust Localhost";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OcrStats {
    pub characters: u32,
    pub words: u32,
    pub lines: u32,
    pub processing_time: &'static str,
}

pub const STATS: OcrStats = OcrStats {
    characters: 625,
    words: 98,
    lines: 32,
    processing_time: "0.8s",
};

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedText {
    pub text: String,
    pub confidence: f64,
    pub stats: OcrStats,
}

/// Canned recognition result. Only the language, mode and timestamp vary.
pub fn recognize(language: &str, mode: &str, generated: NaiveDateTime) -> RecognizedText {
    let text = format!(
        "🚀 BIKER OCR - SERVER RESULT 🚀
Generated: {generated}

============================================
📊 OCR PROCESSING COMPLETE
============================================

🔧 CONFIGURATION:
• Language: {language}
• Mode: {mode}
• Server: {SERVER_LABEL}
• Status: SUCCESS

📝 SAMPLE EXTRACTED TEXT:
-------------------------
MOTORCYCLE REGISTRATION
PLATE: B 5678 XYZ
BRAND: YAMAHA R15 V3
YEAR: 2022
COLOR: BLUE

ENGINE NUMBER: YH3R15V3456789
CHASSIS NUMBER: MAJYR15V3123456
OWNER: ANDI PRASETYA

ADDRESS:
JL. MENTENG RAYA NO. 45
JAKARTA PUSAT 10310

INSURANCE:
• Provider: ASURANSI JIWA
• Policy: MC-2023-7890
• Valid Until: 2024-12-31

MAINTENANCE HISTORY:
1. First Service: 1,000 km (2022-05-10)
2. Regular Service: 5,000 km (2022-11-15)
3. Major Service: 10,000 km (2023-05-20)

============================================
📈 STATISTICS:
• Characters: {characters}
• Words: {words}
• Lines: {lines}
• Confidence: {CONFIDENCE}%
• Processing Time: {processing_time}
============================================

💡 NOTE:
This is a demo result from the Biker OCR server.
For real OCR, install Tesseract OCR.
",
        generated = generated.format("%Y-%m-%d %H:%M:%S"),
        language = language.to_uppercase(),
        mode = mode.to_uppercase(),
        characters = STATS.characters,
        words = STATS.words,
        lines = STATS.lines,
        processing_time = STATS.processing_time,
    );
    RecognizedText {
        text,
        confidence: CONFIDENCE,
        stats: STATS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    #[test]
    fn echoes_configuration_uppercased() {
        let result = recognize("ind", "fast", at());
        assert!(result.text.contains("• Language: IND\n"));
        assert!(result.text.contains("• Mode: FAST\n"));
        assert!(result.text.contains("Generated: 2024-05-01 12:30:00\n"));
    }

    #[test]
    fn statistics_are_fixed() {
        let a = recognize("eng", "balanced", at());
        let b = recognize("jpn", "accurate", at());
        assert_eq!(a.confidence, 96.2);
        assert_eq!(a.stats, b.stats);
        assert!(a.text.contains("• Confidence: 96.2%"));
        assert!(a.text.contains("• Characters: 625"));
    }
}
