//! End-to-end reader test against synthetic ROOT files produced by the
//! fixture builder in `mp_root::testdata`.

use std::path::PathBuf;

use mp_root::testdata::TreeFixture;
use mp_root::{Leaf, RootFile};

fn build_file() -> Vec<u8> {
    TreeFixture::new("Events")
        .scalar_f32("GenMET_pt", &[31.5, 12.0, 140.25, 8.5, 77.0])
        .scalar_i32("PV_npvs", &[12, 33, 7, 21, 40])
        .jagged_f32(
            "Jet_pt",
            &[vec![50.0, 30.0], vec![20.0], vec![], vec![10.0, 5.0, 2.0], vec![7.0]],
        )
        .build()
}

#[test]
fn synthetic_file_round_trip() {
    let file = RootFile::from_bytes(build_file(), PathBuf::from("synthetic.root")).unwrap();

    let keys = file.list_keys().unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].name, "Events");
    assert_eq!(keys[0].class_name, "TTree");

    let tree = file.get_tree("Events").unwrap();
    assert_eq!(tree.name, "Events");
    assert_eq!(tree.entries, 5);
    let names: Vec<&str> = tree.branch_names().collect();
    assert_eq!(names, ["GenMET_pt", "PV_npvs", "Jet_pt"]);
    assert_eq!(tree.branch("GenMET_pt").unwrap().leaf, Leaf::F32);
    assert_eq!(tree.branch("PV_npvs").unwrap().leaf, Leaf::I32);
    // Five entries split the scalar branches over two zlib baskets.
    assert_eq!(tree.branch("GenMET_pt").unwrap().n_baskets, 2);

    let genmet = file.scalar_f64(&tree, "GenMET_pt").unwrap();
    assert_eq!(genmet, vec![31.5, 12.0, 140.25, 8.5, 77.0]);

    let npvs = file.scalar_f64(&tree, "PV_npvs").unwrap();
    assert_eq!(npvs, vec![12.0, 33.0, 7.0, 21.0, 40.0]);

    // Jagged with an empty entry in the middle.
    let jets = file.jagged_f64(&tree, "Jet_pt").unwrap();
    assert_eq!(jets.n_entries(), 5);
    assert_eq!(jets.entry(0), &[50.0, 30.0]);
    assert_eq!(jets.entry(1), &[20.0]);
    assert!(jets.entry(2).is_empty());
    assert_eq!(jets.entry(3), &[10.0, 5.0, 2.0]);
    assert_eq!(jets.entry(4), &[7.0]);
}

#[test]
fn jagged_access_on_scalar_branch_fails() {
    let file = RootFile::from_bytes(build_file(), PathBuf::from("synthetic.root")).unwrap();
    let tree = file.get_tree("Events").unwrap();
    assert!(file.jagged_f64(&tree, "GenMET_pt").is_err());
}

#[test]
fn missing_branch_and_tree() {
    let file = RootFile::from_bytes(build_file(), PathBuf::from("synthetic.root")).unwrap();
    assert!(file.get_tree("NotATree").is_err());
    let tree = file.get_tree("Events").unwrap();
    assert!(file.scalar_f64(&tree, "NoSuchBranch").is_err());
}

#[test]
fn open_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.root");
    std::fs::write(&path, build_file()).unwrap();

    let file = RootFile::open(&path).unwrap();
    let tree = file.get_tree("Events").unwrap();
    assert_eq!(tree.entries, 5);
    assert_eq!(file.path(), path.as_path());
}

#[test]
fn larger_sample_survives_basket_split() {
    let values: Vec<f64> = (0..257).map(|i| (i as f64) * 0.5).collect();
    let bytes = TreeFixture::new("Events").scalar_f32("GenMET_pt", &values).build();
    let file = RootFile::from_bytes(bytes, PathBuf::from("large.root")).unwrap();
    let tree = file.get_tree("Events").unwrap();
    assert_eq!(file.scalar_f64(&tree, "GenMET_pt").unwrap(), values);
}
