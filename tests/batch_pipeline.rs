use std::io::Cursor;

use qrforge::{
    Batch, Contact, ErrorCorrection, OutputFormat, QrForgeError, StyleOptions, package_zip,
};

fn csv_with_oversized_row() -> String {
    // row 2 carries an address far beyond QR byte capacity at level H
    let address = "x".repeat(3000);
    format!(
        "firstName,lastName,organization,title,email,phone,website,address\n\
         Ana,Ruiz,Acme,Engineer,ana@acme.example,+34600000000,,Calle Mayor 1\n\
         Luis,Vega,Acme,Designer,luis@acme.example,+34600000001,,{address}\n\
         Mar,Sol,Beta,CTO,mar@beta.example,+34600000002,,Plaza Norte 2\n"
    )
}

#[test]
fn failing_row_is_excluded_and_logged_not_fatal() {
    let batch = Batch::from_csv(csv_with_oversized_row().as_bytes()).unwrap();
    let style = StyleOptions {
        error_correction: ErrorCorrection::H,
        ..StyleOptions::default()
    };

    let outcome = batch.run(&style, OutputFormat::Png);

    assert_eq!(outcome.artifacts.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].ordinal, 2);
    assert!(matches!(
        outcome.failures[0].error,
        QrForgeError::Encoding(_)
    ));

    let names: Vec<&str> = outcome.artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["001_Ana_Ruiz_QR.png", "003_Mar_Sol_QR.png"]);
}

#[test]
fn container_holds_only_successful_artifacts() {
    let batch = Batch::from_csv(csv_with_oversized_row().as_bytes()).unwrap();
    let style = StyleOptions {
        error_correction: ErrorCorrection::H,
        ..StyleOptions::default()
    };

    let outcome = batch.run(&style, OutputFormat::Png);
    let bytes = package_zip(&outcome.artifacts).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 2);
    for i in 0..archive.len() {
        let entry = archive.by_index(i).unwrap();
        assert!(entry.name().ends_with("_QR.png"));
        assert!(!entry.name().starts_with("002_"));
    }
}

#[test]
fn both_format_doubles_container_entries() {
    let csv = "firstName,lastName,organization,title,email,phone,website,address\n\
               Ana,Ruiz,Acme,Engineer,ana@acme.example,+34600000000,,\n";
    let batch = Batch::from_csv(csv.as_bytes()).unwrap();

    let outcome = batch.run(&StyleOptions::default(), OutputFormat::Both);
    assert!(outcome.failures.is_empty());

    let names: Vec<&str> = outcome.artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["001_Ana_Ruiz_QR.png", "001_Ana_Ruiz_QR.svg"]);
}

#[test]
fn batch_artifacts_decode_to_styled_dimensions() {
    let csv = "firstName,lastName,organization,title,email,phone,website,address\n\
               Mar,Sol,Beta,CTO,mar@beta.example,+34600000002,,\n";
    let batch = Batch::from_csv(csv.as_bytes()).unwrap();
    let style = StyleOptions {
        size: 240,
        ..StyleOptions::default()
    };

    let outcome = batch.run(&style, OutputFormat::Png);
    let img = image::load_from_memory(&outcome.artifacts[0].bytes).unwrap();
    assert_eq!((img.width(), img.height()), (240, 240));
}

#[test]
fn edited_batch_regenerates_under_stable_names() {
    let mut batch = Batch::from_csv(csv_with_oversized_row().as_bytes()).unwrap();
    batch.remove(2);
    let edited = Contact {
        first_name: "Marina".to_string(),
        ..batch.records()[1].contact.clone()
    };
    batch.replace(3, edited);

    let outcome = batch.run(&StyleOptions::default(), OutputFormat::Png);
    let names: Vec<&str> = outcome.artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["001_Ana_Ruiz_QR.png", "003_Marina_Sol_QR.png"]);
}
