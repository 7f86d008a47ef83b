use qrform::{Category, FormSession, QrEncoder, build_payload};

fn decode(image: &image::DynamicImage) -> String {
    let mut prepared = rqrr::PreparedImage::prepare(image.to_luma8());
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one code in the image");
    let (_meta, content) = grids[0].decode().expect("decode grid");
    content
}

#[test]
fn every_category_renders_a_scannable_code() {
    let encoder = QrEncoder::new().with_size(400);

    for category in Category::ALL {
        let payload = build_payload(category, "example.com", "secret message");
        let image = encoder.encode(&payload).expect("encode payload");
        assert_eq!(decode(&image), payload, "round trip failed for {category}");
    }
}

#[test]
fn session_payload_survives_png_export_bytes() {
    let mut session = FormSession::new();
    session.select(Category::Wifi).unwrap();
    session.set_primary("HomeNet").unwrap();
    session.set_secondary("secret").unwrap();
    let payload = session.generate().unwrap().to_string();

    let png = QrEncoder::new().with_size(400).encode_png(&payload).unwrap();
    let image = image::load_from_memory(&png).expect("load png");

    assert_eq!(decode(&image), "WIFI:S:HomeNet;T:WPA;P:secret;;");
}
