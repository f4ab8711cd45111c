extern crate leaf_detect;

use image::{Rgb, RgbImage};
use leaf_detect::annotate::Annotator;
use leaf_detect::common::{BBox, ClassCatalog, Detection};

fn catalog() -> ClassCatalog {
    ClassCatalog::new(&["healthy", "leaf miner", "red rust"])
}

#[test]
fn draws_box_border_in_class_colour() {
    let image = RgbImage::new(100, 100);
    let detections = vec![Detection::new(0, BBox::new(10., 40., 60., 90.), 0.9)];

    let annotated = Annotator::new().annotate(&image, &detections, &catalog());

    // healthy is drawn green; border runs along the box edges
    let border = annotated.get_pixel(30, 40);
    assert_eq!(border, &Rgb([0, 170, 0]));
    // interior stays untouched
    assert_eq!(annotated.get_pixel(35, 65), &Rgb([0, 0, 0]));
    // source image is not mutated
    assert_eq!(image.get_pixel(30, 40), &Rgb([0, 0, 0]));
}

#[test]
fn caption_strip_is_filled_above_the_box() {
    let image = RgbImage::new(120, 120);
    let detections = vec![Detection::new(2, BBox::new(10., 50., 100., 110.), 0.8)];

    let annotated = Annotator::new().annotate(&image, &detections, &catalog());

    // strip occupies the rows just above y1
    assert_eq!(annotated.get_pixel(15, 40), &Rgb([220, 20, 20]));
}

#[test]
fn degenerate_boxes_are_skipped() {
    let image = RgbImage::new(50, 50);
    let detections = vec![Detection::new(1, BBox::new(20., 20., 20., 20.), 0.9)];

    let annotated = Annotator::new().annotate(&image, &detections, &catalog());
    assert_eq!(annotated, image);
}

#[test]
fn out_of_bounds_boxes_are_clamped_not_panicking() {
    let image = RgbImage::new(64, 64);
    let detections = vec![
        Detection::new(1, BBox::new(-10., -10., 40., 40.), 0.9),
        Detection::new(2, BBox::new(30., 30., 500., 500.), 0.7),
    ];

    let annotated = Annotator::new().annotate(&image, &detections, &catalog());
    assert_eq!(annotated.dimensions(), (64, 64));
}

#[test]
fn unknown_classes_draw_in_fallback_colour() {
    let image = RgbImage::new(80, 80);
    let detections = vec![Detection::new(42, BBox::new(10., 30., 60., 70.), 0.6)];

    let annotated = Annotator::new().annotate(&image, &detections, &catalog());
    assert_eq!(annotated.get_pixel(30, 30), &Rgb([0, 0, 255]));
}

#[test]
fn annotator_without_font_reports_none() {
    assert!(!Annotator::new().has_font());
    assert!(Annotator::with_font_path("/nonexistent/font.ttf").is_err());
}
