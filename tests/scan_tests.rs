use dupescan::duplicates::{DuplicateFinder, FinderConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

fn quiet_finder() -> DuplicateFinder {
    DuplicateFinder::new(FinderConfig::default().with_verbose(false))
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let (report, summary) = quiet_finder().find(dir.path()).unwrap();

    assert!(report.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_file_groups, 0);
}

#[test]
fn test_scan_unique_files_yields_empty_report() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), b"content a");
    write_file(&dir.path().join("b.txt"), b"content b");
    write_file(&dir.path().join("c.txt"), b"content c");

    let (report, summary) = quiet_finder().find(dir.path()).unwrap();

    assert!(report.is_empty());
    assert!(report.duplicate_files.is_none());
    assert!(report.duplicate_dirs.is_none());
    assert_eq!(summary.total_files, 3);
}

#[test]
fn test_flat_duplicate_pair() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("file1.txt"), b"This is some test content.");
    write_file(&dir.path().join("file2.txt"), b"This is some test content.");
    write_file(&dir.path().join("unique.txt"), b"Something else entirely.");

    let (report, _) = quiet_finder().find(dir.path()).unwrap();

    let groups = report.duplicate_files.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].member_count(), 2);

    let members: Vec<_> = groups[0]
        .files
        .iter()
        .map(|m| m.relative_path.clone())
        .collect();
    assert_eq!(
        members,
        vec![PathBuf::from("file1.txt"), PathBuf::from("file2.txt")]
    );
}

#[test]
fn test_duplicate_group_members_are_byte_identical() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("x/one.bin"), b"payload payload payload");
    write_file(&dir.path().join("y/two.bin"), b"payload payload payload");
    write_file(&dir.path().join("z/three.bin"), b"different bytes here...");

    let (report, _) = quiet_finder().find(dir.path()).unwrap();

    let groups = report.duplicate_files.unwrap();
    for group in &groups {
        assert!(group.member_count() >= 2);
        let first = fs::read(&group.files[0].path).unwrap();
        for member in &group.files[1..] {
            let bytes = fs::read(&member.path).unwrap();
            assert_eq!(first, bytes, "group members must have identical content");
        }
    }
}

#[test]
fn test_size_threshold_filters_small_groups() {
    let dir = tempdir().unwrap();
    // Two duplicate pairs: one tiny, one above 1 MB
    write_file(&dir.path().join("small1.bin"), b"tiny");
    write_file(&dir.path().join("small2.bin"), b"tiny");
    let big = vec![0x5au8; 2 * 1024 * 1024];
    write_file(&dir.path().join("big1.bin"), &big);
    write_file(&dir.path().join("big2.bin"), &big);

    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_size_threshold_mb(1.0)
            .with_verbose(false),
    );
    let (report, _) = finder.find(dir.path()).unwrap();

    let groups = report.duplicate_files.unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0].size_mb >= 1.0);
    for group in &groups {
        assert!(group.size_mb >= 1.0);
    }
}

#[test]
fn test_duplicate_directories_detected() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("dir_a/file1.txt"), b"first file");
    write_file(&dir.path().join("dir_a/file2.txt"), b"second file");
    write_file(&dir.path().join("dir_b/file1.txt"), b"first file");
    write_file(&dir.path().join("dir_b/file2.txt"), b"second file");
    write_file(&dir.path().join("dir_c/file1.txt"), b"unrelated content");

    let (report, _) = quiet_finder().find(dir.path()).unwrap();

    let rows = report.duplicate_dirs.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].group_id, rows[1].group_id);
    assert_eq!(rows[0].group_size, 2);

    let paths: Vec<_> = rows.iter().map(|r| r.relative_path.clone()).collect();
    assert_eq!(paths, vec![PathBuf::from("dir_a"), PathBuf::from("dir_b")]);
    assert!(paths.iter().all(|p| p != &PathBuf::from("dir_c")));
}

#[test]
fn test_wrapper_dirs_excluded_from_directory_report() {
    let dir = tempdir().unwrap();
    // a and c each contain nothing but the single subdirectory b
    write_file(&dir.path().join("a/b/f1.txt"), b"one");
    write_file(&dir.path().join("a/b/f2.txt"), b"two");
    write_file(&dir.path().join("c/b/f1.txt"), b"one");
    write_file(&dir.path().join("c/b/f2.txt"), b"two");

    let (report, _) = quiet_finder().find(dir.path()).unwrap();

    let rows = report.duplicate_dirs.unwrap();
    let paths: Vec<_> = rows.iter().map(|r| r.relative_path.clone()).collect();
    assert_eq!(paths, vec![PathBuf::from("a/b"), PathBuf::from("c/b")]);
}

#[test]
fn test_extension_filter_disables_directory_detection() {
    let dir = tempdir().unwrap();
    // Two fully duplicate directories
    write_file(&dir.path().join("left/data.csv"), b"rows");
    write_file(&dir.path().join("right/data.csv"), b"rows");

    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_extensions(vec!["csv".to_string()])
            .with_verbose(false),
    );
    let (report, _) = finder.find(dir.path()).unwrap();

    // The duplicate files are still found, the directories never are
    assert!(report.duplicate_files.is_some());
    assert!(report.duplicate_dirs.is_none());
}

#[test]
fn test_extension_filter_restricts_files() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.csv"), b"same bytes");
    write_file(&dir.path().join("b.csv"), b"same bytes");
    write_file(&dir.path().join("a.log"), b"log bytes!");
    write_file(&dir.path().join("b.log"), b"log bytes!");

    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_extensions(vec!["csv".to_string()])
            .with_verbose(false),
    );
    let (report, summary) = finder.find(dir.path()).unwrap();

    assert_eq!(summary.total_files, 2);
    let groups = report.duplicate_files.unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0]
        .files
        .iter()
        .all(|m| m.relative_path.extension().unwrap() == "csv"));
}

#[test]
fn test_repeat_scans_are_identical() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("p/one.txt"), b"dup");
    write_file(&dir.path().join("p/two.txt"), b"dup");
    write_file(&dir.path().join("q/one.txt"), b"dup");
    write_file(&dir.path().join("r/solo.txt"), b"only");

    let (first, _) = quiet_finder().find(dir.path()).unwrap();
    let (second, _) = quiet_finder().find(dir.path()).unwrap();

    let first_files: Vec<_> = first
        .duplicate_files
        .unwrap()
        .iter()
        .map(|g| {
            (
                g.group_id,
                g.hash,
                g.files
                    .iter()
                    .map(|m| m.relative_path.clone())
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    let second_files: Vec<_> = second
        .duplicate_files
        .unwrap()
        .iter()
        .map(|g| {
            (
                g.group_id,
                g.hash,
                g.files
                    .iter()
                    .map(|m| m.relative_path.clone())
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    assert_eq!(first_files, second_files);
    assert_eq!(first.duplicate_dirs, second.duplicate_dirs);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    for i in 0..6 {
        write_file(
            &dir.path().join(format!("set/file{i}.bin")),
            format!("content {}", i % 3).as_bytes(),
        );
    }

    let sequential = DuplicateFinder::new(FinderConfig::default().with_verbose(false));
    let parallel =
        DuplicateFinder::new(FinderConfig::default().with_workers(4).with_verbose(false));

    let (seq_report, _) = sequential.find(dir.path()).unwrap();
    let (par_report, _) = parallel.find(dir.path()).unwrap();

    let seq_groups = seq_report.duplicate_files.unwrap();
    let par_groups = par_report.duplicate_files.unwrap();
    assert_eq!(seq_groups.len(), par_groups.len());
    for (s, p) in seq_groups.iter().zip(par_groups.iter()) {
        assert_eq!(s.group_id, p.group_id);
        assert_eq!(s.hash, p.hash);
        let s_paths: Vec<_> = s.files.iter().map(|m| m.relative_path.clone()).collect();
        let p_paths: Vec<_> = p.files.iter().map(|m| m.relative_path.clone()).collect();
        assert_eq!(s_paths, p_paths);
    }
}

#[test]
fn test_member_modification_times_come_from_metadata() {
    use filetime::FileTime;

    let dir = tempdir().unwrap();
    let one = dir.path().join("one.txt");
    let two = dir.path().join("two.txt");
    write_file(&one, b"stamped");
    write_file(&two, b"stamped");

    let stamp = FileTime::from_unix_time(1_600_000_000, 0);
    filetime::set_file_mtime(&one, stamp).unwrap();
    filetime::set_file_mtime(&two, stamp).unwrap();

    let (report, _) = quiet_finder().find(dir.path()).unwrap();

    let groups = report.duplicate_files.unwrap();
    for member in &groups[0].files {
        let secs = member
            .modified
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        assert_eq!(secs, 1_600_000_000);
    }
}

#[test]
fn test_nested_duplicate_dirs_with_distinct_parents() {
    let dir = tempdir().unwrap();
    // Parents hold extra files, so they are not wrappers and not duplicates;
    // only the nested pair matches
    write_file(&dir.path().join("proj1/readme.md"), b"project one");
    write_file(&dir.path().join("proj1/assets/logo.png"), b"png bytes");
    write_file(&dir.path().join("proj2/readme.md"), b"project two");
    write_file(&dir.path().join("proj2/assets/logo.png"), b"png bytes");

    let (report, _) = quiet_finder().find(dir.path()).unwrap();

    let rows = report.duplicate_dirs.unwrap();
    let paths: Vec<_> = rows.iter().map(|r| r.relative_path.clone()).collect();
    assert_eq!(
        paths,
        vec![PathBuf::from("proj1/assets"), PathBuf::from("proj2/assets")]
    );
}

#[test]
fn test_empty_files_group_together() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("empty1.dat"), b"");
    write_file(&dir.path().join("empty2.dat"), b"");

    let (report, _) = quiet_finder().find(dir.path()).unwrap();

    let groups = report.duplicate_files.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size_bytes, 0);
    assert_eq!(groups[0].member_count(), 2);
}

#[test]
fn test_three_way_duplicate_group() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a/copy.txt"), b"triplicate");
    write_file(&dir.path().join("b/copy.txt"), b"triplicate");
    write_file(&dir.path().join("c/copy.txt"), b"triplicate");

    let (report, _) = quiet_finder().find(dir.path()).unwrap();

    let groups = report.duplicate_files.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].member_count(), 3);
    assert_eq!(groups[0].wasted_bytes(), 2 * "triplicate".len() as u64);
}
