//! Archive fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub enum Item<'a> {
    Dir(&'a str),
    File(&'a str, Vec<u8>),
    Stored(&'a str, Vec<u8>),
}

fn options(method: CompressionMethod) -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(method)
}

/// Write a zip archive holding `items` to `dir/name`.
pub fn write_archive(dir: &Path, name: &str, items: &[Item<'_>]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);

    for item in items {
        match item {
            Item::Dir(name) => zip.add_directory(*name, options(CompressionMethod::Stored)).unwrap(),
            Item::File(name, data) => {
                zip.start_file(*name, options(CompressionMethod::Deflated)).unwrap();
                zip.write_all(data).unwrap();
            }
            Item::Stored(name, data) => {
                zip.start_file(*name, options(CompressionMethod::Stored)).unwrap();
                zip.write_all(data).unwrap();
            }
        }
    }

    zip.finish().unwrap();
    path
}

/// Archive of `count` one-byte stored files under `assets/`.
pub fn many_entries(dir: &Path, name: &str, count: usize) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);

    for i in 0..count {
        zip.start_file(format!("assets/{i:05}.bin"), options(CompressionMethod::Stored))
            .unwrap();
        zip.write_all(&[i as u8]).unwrap();
    }

    zip.finish().unwrap();
    path
}

/// Small application package layout.
pub fn sample_apk(dir: &Path, name: &str) -> PathBuf {
    write_archive(
        dir,
        name,
        &[
            Item::File("AndroidManifest.xml", vec![b'm'; 1200]),
            Item::File("classes.dex", vec![0; 100 * 1024]),
            Item::Stored("resources.arsc", vec![1; 50 * 1024]),
            Item::Dir("assets/"),
            Item::File("assets/data.json", b"{\"sample\": \"data\"}".to_vec()),
            Item::File("assets/config.xml", b"<config></config>".to_vec()),
            Item::Dir("lib/"),
            Item::Dir("lib/arm64-v8a/"),
            Item::Stored("lib/arm64-v8a/libnative.so", vec![2; 200 * 1024]),
            Item::Stored("lib/armeabi-v7a/libnative.so", vec![3; 180 * 1024]),
            Item::File("res/drawable/icon.png", vec![4; 10 * 1024]),
            Item::File("res/layout/activity_main.xml", vec![b'l'; 600]),
            Item::File("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n".to_vec()),
            Item::File("META-INF/CERT.RSA", vec![5; 2 * 1024]),
        ],
    )
}

/// Larger build of the same package: more code, more libraries, one file gone.
pub fn larger_apk(dir: &Path, name: &str) -> PathBuf {
    write_archive(
        dir,
        name,
        &[
            Item::File("AndroidManifest.xml", vec![b'm'; 1200]),
            Item::File("classes.dex", vec![0; 150 * 1024]),
            Item::File("classes2.dex", vec![0; 120 * 1024]),
            Item::Stored("resources.arsc", vec![1; 50 * 1024]),
            Item::File("assets/data.json", b"{\"sample\": \"data\"}".to_vec()),
            Item::Stored("assets/large_file.dat", vec![6; 500 * 1024]),
            Item::Stored("lib/arm64-v8a/libnative.so", vec![2; 300 * 1024]),
            Item::Stored("lib/armeabi-v7a/libnative.so", vec![3; 180 * 1024]),
            Item::Stored("lib/x86/libnative.so", vec![7; 250 * 1024]),
            Item::File("res/drawable/icon.png", vec![4; 15 * 1024]),
            Item::File("res/layout/activity_main.xml", vec![b'l'; 600]),
            Item::File("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n".to_vec()),
            Item::File("META-INF/CERT.RSA", vec![5; 3 * 1024]),
        ],
    )
}
