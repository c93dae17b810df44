use folder2pdf::orchestrator::{NoProgress, RecordingProgress};
use folder2pdf::{
    App, BatchRunner, Config, OrderingEngine, Preview, ProgressEvent, SortConfig, SortOptions,
    TaskError, TaskRegistry, TaskStatus,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

fn write_png(folder: &Path, name: &str, w: u32, h: u32) {
    RgbImage::from_pixel(w, h, Rgb([30, 60, 90]))
        .save_with_format(folder.join(name), image::ImageFormat::Png)
        .unwrap();
}

fn make_folder(root: &Path, name: &str) -> PathBuf {
    let folder = root.join(name);
    fs::create_dir(&folder).unwrap();
    folder
}

fn page_count(path: &Path) -> usize {
    lopdf::Document::load(path).unwrap().get_pages().len()
}

#[test]
fn test_corrupt_image_gives_partial_success() {
    let root = tempfile::tempdir().unwrap();
    let folder = make_folder(root.path(), "chapter");
    for (i, name) in ["p1.png", "p2.png", "p3.jpg", "p5.webp"].iter().enumerate() {
        write_png(&folder, name, 4 + i as u32, 3);
    }
    fs::write(folder.join("p4.png"), b"not an image at all").unwrap();

    let mut registry = TaskRegistry::new();
    assert!(registry.add(&folder));

    let runner = BatchRunner::default();
    let result = runner.run(
        &registry.snapshot(),
        &SortConfig::default(),
        "{folder_name}",
        &mut NoProgress,
    );

    let task = &result.tasks[0];
    assert!(task.succeeded);
    assert_eq!(task.status(), TaskStatus::Partial);
    assert_eq!(task.images_processed, 4);
    assert_eq!(task.images_skipped, 1);

    // 输出在源文件夹旁边，不在文件夹内
    let output = task.output_path.clone().unwrap();
    assert_eq!(output, root.path().canonicalize().unwrap().join("chapter.pdf"));
    assert!(output.exists());
    assert_eq!(page_count(&output), 4);
    assert!(!folder.join("chapter.pdf").exists());
}

#[test]
fn test_empty_folder_does_not_stop_the_run() {
    let root = tempfile::tempdir().unwrap();
    let empty = make_folder(root.path(), "empty");
    let full = make_folder(root.path(), "full");
    write_png(&full, "a.png", 2, 2);
    write_png(&full, "b.png", 2, 2);

    let mut registry = TaskRegistry::new();
    registry.add(&empty);
    registry.add_with_template(&full, "合集_{folder_name}");

    let mut progress = RecordingProgress::default();
    let result = BatchRunner::default().run(
        &registry.snapshot(),
        &SortConfig::default(),
        "{folder_name}",
        &mut progress,
    );

    assert_eq!(result.total(), 2);
    assert!(matches!(result.tasks[0].error, Some(TaskError::NoImages)));
    assert!(!root.path().join("empty.pdf").exists());

    assert!(result.tasks[1].succeeded);
    let output = root.path().join("合集_full.pdf");
    assert!(output.exists());
    assert_eq!(page_count(&output), 2);

    // 第二个任务的进度恰好到达总数一次
    let image_events: Vec<(usize, usize)> = progress
        .events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Image { index: 2, done, total } => Some((*done, *total)),
            _ => None,
        })
        .collect();
    assert_eq!(image_events, vec![(1, 2), (2, 2)]);
}

#[test]
fn test_alpha_png_is_flattened_into_page() {
    let root = tempfile::tempdir().unwrap();
    let folder = make_folder(root.path(), "alpha");
    RgbaImage::from_pixel(5, 7, Rgba([255, 0, 0, 0]))
        .save(folder.join("a.png"))
        .unwrap();

    let mut registry = TaskRegistry::new();
    registry.add(&folder);
    let result = BatchRunner::default().run(
        &registry.snapshot(),
        &SortConfig::default(),
        "",
        &mut NoProgress,
    );

    assert_eq!(result.tasks[0].status(), TaskStatus::Succeeded);
    assert_eq!(page_count(&root.path().join("alpha.pdf")), 1);
}

#[test]
fn test_prefix_preview_on_folder() {
    let root = tempfile::tempdir().unwrap();
    let folder = make_folder(root.path(), "manga");
    for name in ["ChapterA_p2.jpg", "ChapterA_p10.jpg", "ChapterB_p1.jpg"] {
        fs::write(folder.join(name), b"x").unwrap();
    }

    let options = SortOptions {
        mode: "prefix".to_string(),
        prefix_length: "8".to_string(),
        ..SortOptions::default()
    };

    let mut preview = Preview::new();
    let items = preview.refresh(&folder, &options).unwrap().to_vec();
    assert_eq!(items, ["ChapterA_p2.jpg", "ChapterA_p10.jpg", "ChapterB_p1.jpg"]);

    let reversed = SortOptions {
        reverse: true,
        ..options
    };
    let items = preview.refresh(&folder, &reversed).unwrap().to_vec();
    assert_eq!(items, ["ChapterB_p1.jpg", "ChapterA_p2.jpg", "ChapterA_p10.jpg"]);
}

#[test]
fn test_modified_time_order() {
    let root = tempfile::tempdir().unwrap();
    let folder = make_folder(root.path(), "timeline");
    let now = std::time::SystemTime::now();
    for (name, age) in [("a.png", 10u64), ("b.png", 30), ("c.png", 20)] {
        let path = folder.join(name);
        fs::write(&path, b"x").unwrap();
        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(now - std::time::Duration::from_secs(age))
            .unwrap();
    }

    let names: Vec<String> = ["a.png", "b.png", "c.png"].iter().map(|s| s.to_string()).collect();
    let config = SortConfig::new(folder2pdf::SortMode::ModifiedTime, false, 9, 10).unwrap();
    let ordered = OrderingEngine::new().order(&names, &folder, &config);
    assert_eq!(ordered, ["b.png", "c.png", "a.png"]);
}

#[tokio::test]
async fn test_app_runs_in_background_and_writes_report() {
    let root = tempfile::tempdir().unwrap();
    let folder = make_folder(root.path(), "vol1");
    write_png(&folder, "p1.png", 3, 3);

    let config = Config {
        output_log_file: root.path().join("log.txt").to_string_lossy().to_string(),
        report_file: Some(root.path().join("report.json").to_string_lossy().to_string()),
        ..Config::default()
    };

    let mut app = App::initialize(config).await.unwrap();
    assert_eq!(app.add_folders([&folder, &folder]), 1);

    let result = app.run().await.unwrap();
    assert_eq!(result.succeeded(), 1);
    assert!(root.path().join("vol1.pdf").exists());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(report["tasks"][0]["images_processed"], 1);
}

#[tokio::test]
async fn test_app_rejects_invalid_sort_options() {
    let root = tempfile::tempdir().unwrap();
    let config = Config {
        output_log_file: root.path().join("log.txt").to_string_lossy().to_string(),
        sort: SortOptions {
            mode: "suffix".to_string(),
            suffix_length: "ten".to_string(),
            ..SortOptions::default()
        },
        ..Config::default()
    };

    assert!(App::initialize(config).await.is_err());
}
