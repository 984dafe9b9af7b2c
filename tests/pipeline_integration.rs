// End-to-end pipeline tests over realistic transcript lines.

use std::io::Write;

use vinorm::{detect_and_normalize, Category, CprModel, Pipeline, SecDictionary};

fn pipeline() -> Pipeline {
    Pipeline::new(SecDictionary::empty())
}

/// Full spoken date collapses to a slash date inside a larger sentence
#[test]
fn test_spoken_date_in_sentence() {
    let out = pipeline().process(
        "hẹn gặp vào ngày mười lăm tháng ba năm hai nghìn không trăm hai mươi ba nhé",
    );
    assert!(out.contains("15/03/2023"), "got: {out}");
}

#[test]
fn test_currency_amount() {
    let out = pipeline().process("chuyển khoản hai triệu đồng cho tôi");
    assert_eq!(out, "chuyển khoản 2000000 đồng cho tôi");
}

#[test]
fn test_spoken_phone_digits() {
    let out = pipeline().process("gọi số không chín bảy bảy bốn giúp tôi");
    assert!(out.contains("09774"), "got: {out}");
}

/// Two bare number words are conversational, not a digit sequence
#[test]
fn test_short_sequence_left_alone() {
    let out = pipeline().process("năm bảy người đã đến");
    assert_eq!(out, "năm bảy người đã đến");
}

#[test]
fn test_address_then_entities() {
    let out = pipeline().process("nhà 15 Trên 6 Trên 89 Tô Ngọc Vân giá hai triệu đồng");
    assert_eq!(out, "nhà 15/6/89 Tô Ngọc Vân giá 2000000 đồng");
}

#[test]
fn test_time_with_minutes() {
    let out = pipeline().process("họp lúc ba giờ ba mươi phút chiều");
    assert_eq!(out, "họp lúc 03:30 chiều");
}

#[test]
fn test_tone_normalization_end_of_pipeline() {
    let out = pipeline().process("Thôn Trung Hà, Xã Thái Hoà, Huyện Ba Vì");
    assert_eq!(out, "Thôn Trung Hà, Xã Thái Hòa, Huyện Ba Vì");
}

#[test]
fn test_sec_dictionary_from_file_in_pipeline() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "nguyen -> nguyễn").expect("Failed to write rule");
    file.flush().expect("Failed to flush");

    let sec = SecDictionary::from_file(file.path()).expect("Dictionary should load");
    let out = Pipeline::new(sec).process("anh Nguyen ơi");
    assert_eq!(out, "anh Nguyễn ơi");
}

#[test]
fn test_cpr_failure_falls_back_to_pre_cpr_text() {
    struct Broken;
    impl CprModel for Broken {
        fn restore(&self, _text: &str) -> anyhow::Result<String> {
            anyhow::bail!("service down")
        }
    }

    let err = pipeline()
        .process_with_cpr("giá hai triệu đồng", &Broken)
        .expect_err("CPR should fail");
    assert_eq!(err.pre_cpr_text, "giá 2000000 đồng");
}

/// Entity reporting mode: spans index the input and serialize to JSON
#[test]
fn test_entity_report_spans_and_json() {
    let text = "họp lúc ba giờ ba mươi phút";
    let ents = detect_and_normalize(text);
    assert_eq!(ents.len(), 1);
    assert_eq!(ents[0].entity.category, Category::Time);
    assert_eq!(&text[ents[0].entity.start..ents[0].entity.end], ents[0].entity.text);

    let json = serde_json::to_string(&ents).expect("Serialization should succeed");
    assert!(json.contains("\"category\":\"Time\""), "got: {json}");
    assert!(json.contains("\"normalized\":\"03:30\""), "got: {json}");
}

/// Detected spans never overlap, whatever the input mixes together
#[test]
fn test_detected_spans_never_overlap() {
    let lines = [
        "ngày mười lăm tháng ba năm hai nghìn không trăm hai mươi ba lúc ba giờ",
        "hai phẩy năm phần trăm của hai triệu đồng",
        "số không chín bảy bảy bốn năm hai ba một sáu",
    ];
    for line in lines {
        let ents = detect_and_normalize(line);
        for pair in ents.windows(2) {
            assert!(
                pair[0].entity.end <= pair[1].entity.start,
                "overlap in {line:?}: {pair:?}"
            );
        }
    }
}

/// Amounts past i64 must degrade to the original span, never panic
#[test]
fn test_overflowing_currency_amount_left_unchanged() {
    let text = "giá 9999999999 tỷ đồng";
    assert_eq!(pipeline().process(text), text);
}

#[test]
fn test_overflowing_number_sequence_left_unchanged() {
    let text = "mã 9223372036854775807 tỷ tỷ";
    assert_eq!(pipeline().process(text), text);
}

#[test]
fn test_plain_sentence_untouched() {
    let text = "xin chào quý khách đến với cửa hàng";
    assert_eq!(pipeline().process(text), text);
}
