use std::io::Cursor;

use qrforge::{
    Contact, ContentRecord, LogoOptions, OutputFormat, StyleOptions, generate,
    model::WifiEncryption,
};

fn logo_png(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(16, 16, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn vcard_artifact_is_scannable_black_and_white() {
    let record = ContentRecord::VCard(Contact {
        first_name: "Ana".to_string(),
        last_name: "Ruiz".to_string(),
        email: "ana@acme.example".to_string(),
        phone: "+34600000000".to_string(),
        ..Contact::default()
    });
    let artifact = generate(&record, &StyleOptions::default(), OutputFormat::Png)
        .unwrap()
        .unwrap();

    let img = image::load_from_memory(&artifact.png.unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (300, 300));
    for px in img.pixels() {
        let [r, g, b, a] = px.0;
        assert_eq!(a, 255);
        assert!(r == g && g == b && (r == 0 || r == 255));
    }
}

#[test]
fn logo_overlay_keeps_logo_colors_inside_binarized_qr() {
    let record = ContentRecord::Wifi {
        ssid: "Home".to_string(),
        password: "secret123".to_string(),
        encryption: WifiEncryption::Wpa,
        hidden: false,
    };
    let style = StyleOptions {
        logo: Some(LogoOptions {
            bytes: logo_png([220, 60, 60, 255]),
            size_percent: 20,
        }),
        ..StyleOptions::default()
    };

    let artifact = generate(&record, &style, OutputFormat::Both)
        .unwrap()
        .unwrap();

    let img = image::load_from_memory(&artifact.png.unwrap())
        .unwrap()
        .to_rgba8();
    // center of a 300px canvas sits inside the 60px logo square
    assert_eq!(img.get_pixel(150, 150).0, [220, 60, 60, 255]);
    // corner stays part of the binarized code area
    let [r, g, b, _] = img.get_pixel(0, 0).0;
    assert!(r == g && g == b && (r == 0 || r == 255));

    // the vector artifact is produced from the uncomposited encode
    let svg = artifact.svg.unwrap();
    assert!(svg.contains("<path"));
    assert!(!svg.contains("image"));
}

#[test]
fn svg_and_png_come_from_the_same_matrix() {
    let record = ContentRecord::Phone {
        phone: "+34600000000".to_string(),
    };
    let style = StyleOptions {
        margin: 0,
        size: 210,
        ..StyleOptions::default()
    };
    let artifact = generate(&record, &style, OutputFormat::Both)
        .unwrap()
        .unwrap();

    let code =
        qrcode::QrCode::with_error_correction_level("tel:+34600000000", qrcode::EcLevel::M)
            .unwrap();
    let n = code.width();
    let svg = artifact.svg.unwrap();
    assert!(svg.contains(&format!("viewBox=\"0 0 {n} {n}\"")));

    let img = image::load_from_memory(&artifact.png.unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (210, 210));
    // top-left finder module is dark in both representations
    assert!(svg.contains("M0,0h1v1h-1z"));
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn empty_record_short_circuits_the_encoder() {
    let artifact = generate(
        &ContentRecord::Text { text: String::new() },
        &StyleOptions::default(),
        OutputFormat::Both,
    )
    .unwrap();
    assert!(artifact.is_none());
}
