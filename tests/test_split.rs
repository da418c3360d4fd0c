mod common;

use common::*;
use image::GenericImageView;

#[test]
fn test_split_writes_one_bmp_per_shape() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let input = create_test_image(dir.path(), "page.png", 100, 100);
    let out = dir.path().join("nested/cutouts");

    let report = BatchProcessor::new(three_shapes())
        .with_margin(5)
        .run(Mode::Split, &[BatchItem::new(&input, &out)]);

    assert_eq!(report.failed_items(), 0);
    assert_eq!(report.artifacts_written(), 3);
    assert_eq!(file_names(&out), vec!["0.bmp", "1.bmp", "2.bmp"]);

    let expected = [(30, 30), (20, 30), (15, 13)];
    for (index, dims) in expected.iter().enumerate() {
        let cutout = image::open(out.join(format!("{}.bmp", index)))?;
        assert_eq!(cutout.dimensions(), *dims, "cutout {index}");
    }

    // first cutout starts at (5, 5) of the source
    let source = image::open(&input)?;
    let first = image::open(out.join("0.bmp"))?;
    assert_eq!(first.get_pixel(0, 0), source.get_pixel(5, 5));

    Ok(())
}

#[test]
fn test_split_without_shapes_writes_nothing() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let input = create_test_image(dir.path(), "page.png", 40, 40);
    let out = dir.path().join("empty");

    let report = BatchProcessor::new(ScriptedProvider::empty())
        .run(Mode::Split, &[BatchItem::new(&input, &out)]);

    assert_eq!(report.failed_items(), 0);
    assert!(out.is_dir());
    assert!(file_names(&out).is_empty());
    Ok(())
}

#[test]
fn test_split_into_existing_directory() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let input = create_test_image(dir.path(), "page.png", 100, 100);
    let out = dir.path().join("already-there");
    std::fs::create_dir_all(&out)?;

    let report = BatchProcessor::new(three_shapes())
        .with_margin(5)
        .run(Mode::Split, &[BatchItem::new(&input, &out)]);

    assert_eq!(report.failed_items(), 0);
    assert_eq!(report.artifacts_written(), 3);
    Ok(())
}

#[test]
fn test_split_failed_cutout_does_not_stop_the_rest() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let input = create_test_image(dir.path(), "page.png", 100, 100);
    let out = dir.path().join("cutouts");

    // a directory where 1.bmp should go makes that write fail
    std::fs::create_dir_all(out.join("1.bmp"))?;

    let report = BatchProcessor::new(three_shapes())
        .with_margin(5)
        .run(Mode::Split, &[BatchItem::new(&input, &out)]);

    assert_eq!(report.failed_items(), 0);
    assert_eq!(report.artifacts_written(), 2);
    assert_eq!(report.artifacts_failed(), 1);
    assert!(out.join("0.bmp").is_file());
    assert!(out.join("2.bmp").is_file());

    match &report.items[0].1 {
        ItemOutcome::Done(artifacts) => {
            assert_eq!(artifacts.written, vec![out.join("0.bmp"), out.join("2.bmp")]);
            assert_eq!(artifacts.failed, 1);
        }
        other => panic!("expected the item to finish, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_split_binary_crops_are_black_and_white() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let input = create_test_image(dir.path(), "page.png", 100, 100);
    let out = dir.path().join("mono");

    BatchProcessor::new(three_shapes())
        .with_margin(5)
        .with_binary_crops(true)
        .run(Mode::Split, &[BatchItem::new(&input, &out)]);

    let cutout = image::open(out.join("0.bmp"))?.to_luma8();
    assert_eq!(cutout.dimensions(), (30, 30));
    assert!(cutout.pixels().all(|p| p[0] == 0 || p[0] == 255));
    Ok(())
}

#[test]
fn test_split_detected_squares_end_to_end() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let scan = create_scan(dir.path(), "scan.png", &[(30, 20, 20), (70, 60, 25)]);
    let out = dir.path().join("shapes");

    let report = BatchProcessor::new(ThresholdContourProvider::new())
        .with_margin(5)
        .run(Mode::Split, &[BatchItem::new(&scan, &out)]);

    assert_eq!(report.failed_items(), 0);
    assert_eq!(file_names(&out), vec!["0.bmp", "1.bmp"]);

    // square spans 30..=49, grown by 5 on each side
    assert_eq!(image::open(out.join("0.bmp"))?.dimensions(), (29, 29));
    assert_eq!(image::open(out.join("1.bmp"))?.dimensions(), (34, 34));
    Ok(())
}
