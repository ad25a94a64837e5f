use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::{Latency, ProviderError, Unconfigured};
use crate::constants::latency;

/// Which analyses to run on an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisOptions {
    pub reverse_search: bool,
    pub metadata_extraction: bool,
    pub facial_recognition: bool,
    pub object_detection: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            reverse_search: true,
            metadata_extraction: true,
            facial_recognition: false,
            object_detection: false,
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EngineMatch {
    pub engine: String,
    pub matches: u32,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarImage {
    pub url: String,
    pub similarity: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseSearchReport {
    pub engines: Vec<EngineMatch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub similar_images: Vec<SimilarImage>,
    pub total_matches: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicMetadata {
    pub filename: String,
    pub filesize: String,
    pub format: String,
    pub dimensions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraMetadata {
    pub make: String,
    pub model: String,
    pub lens: String,
    pub focal_length: String,
    pub aperture: String,
    pub shutter_speed: String,
    pub iso: String,
    pub flash: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMetadata {
    pub gps_coordinates: String,
    pub location: String,
    pub altitude: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Timestamps {
    pub created: String,
    pub modified: String,
}

/// EXIF-style metadata produced by a full analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ImageMetadata {
    pub basic: BasicMetadata,
    pub camera: CameraMetadata,
    pub location: LocationMetadata,
    pub timestamp: Timestamps,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedCamera {
    pub make: String,
    pub model: String,
    pub software: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedLocation {
    pub gps: Option<String>,
    pub location: Option<String>,
}

/// Metadata returned by the standalone extraction endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedMetadata {
    pub basic: BasicMetadata,
    pub camera: ExtractedCamera,
    pub location: ExtractedLocation,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceFeatures {
    pub eye_color: String,
    pub hair_color: String,
    pub glasses: bool,
    pub beard: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Face {
    pub id: String,
    pub confidence: u8,
    pub age: u8,
    pub gender: String,
    pub emotion: String,
    pub position: BoundingBox,
    pub features: FaceFeatures,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceReport {
    pub total_faces: usize,
    pub faces: Vec<Face>,
    pub processing_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectedObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub confidence: u8,
    pub position: BoundingBox,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReport {
    pub total_objects: usize,
    pub objects: Vec<DetectedObject>,
    pub categories: Vec<String>,
    pub processing_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisSections {
    #[serde(rename = "reverseSearch", skip_serializing_if = "Option::is_none")]
    pub reverse_search: Option<ReverseSearchReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faces: Option<FaceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<ObjectReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysis {
    pub analysis_id: String,
    pub timestamp: String,
    pub options: AnalysisOptions,
    pub data: AnalysisSections,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImageResult {
    pub filename: String,
    pub size: String,
    pub reverse_search_matches: u32,
    pub faces_detected: u32,
    pub objects_detected: u32,
    pub has_metadata: bool,
    pub processing_time: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickMatch {
    pub url: String,
    pub similarity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickEngine {
    pub engine: String,
    pub matches: u32,
    pub url: String,
    pub similar: Vec<QuickMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickMetadata {
    pub filename: String,
    pub filesize: String,
    pub dimensions: String,
    pub format: String,
    pub camera: String,
    pub location: String,
    pub timestamp: String,
    pub software: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceMatch {
    pub url: String,
    pub confidence: String,
}

/// Single-call summary used by the quick tools page.
#[derive(Debug, Clone, Serialize)]
pub struct QuickImageAnalysis {
    pub source: String,
    pub reverse_search: Vec<QuickEngine>,
    pub metadata: QuickMetadata,
    pub similar_images: Vec<ConfidenceMatch>,
    pub analysis_timestamp: String,
}

// ============================================================================
// Trait
// ============================================================================

/// Reverse image search and content analysis.
#[async_trait]
pub trait ImageIntel: Send + Sync {
    async fn analyze(&self, options: AnalysisOptions) -> Result<ImageAnalysis, ProviderError>;

    async fn reverse_search(&self, image_url: &str) -> Result<ReverseSearchReport, ProviderError>;

    async fn extract_metadata(
        &self,
        filename: Option<&str>,
    ) -> Result<ExtractedMetadata, ProviderError>;

    /// `index` is zero based and only used to name unnamed uploads.
    async fn bulk_entry(
        &self,
        index: usize,
        filename: Option<&str>,
        size: Option<&str>,
    ) -> Result<BulkImageResult, ProviderError>;

    async fn quick_analysis(&self, source: &str) -> Result<QuickImageAnalysis, ProviderError>;
}

// ============================================================================
// Demo implementation
// ============================================================================

const OBJECT_TYPES: &[&str] = &[
    "Person", "Car", "Building", "Tree", "Dog", "Cat", "Phone", "Laptop",
];
const COLORS: &[&str] = &["Red", "Blue", "Green", "Yellow", "Black", "White"];

pub struct DemoImageIntel {
    latency: Latency,
}

impl DemoImageIntel {
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> String {
    items.choose(rng).copied().unwrap_or_default().to_string()
}

fn processing_time<R: Rng>(rng: &mut R, low: u32, high: u32) -> String {
    format!("{}ms", rng.random_range(low..=high))
}

fn bounding_box<R: Rng>(rng: &mut R, origin: u32, min: u32, max: u32) -> BoundingBox {
    BoundingBox {
        x: rng.random_range(origin..=800),
        y: rng.random_range(origin..=600),
        width: rng.random_range(min..=max),
        height: rng.random_range(min..=max),
    }
}

fn build_similarity_search() -> ReverseSearchReport {
    let mut rng = rand::rng();

    let engines = [
        ("Google Images", 10, 50, "https://images.google.com/search"),
        ("TinEye", 5, 25, "https://tineye.com/search"),
        ("Yandex Images", 8, 30, "https://yandex.com/images"),
        ("Bing Images", 12, 40, "https://bing.com/images"),
    ]
    .into_iter()
    .map(|(engine, low, high, url)| EngineMatch {
        engine: engine.to_string(),
        matches: rng.random_range(low..=high),
        url: url.to_string(),
    })
    .collect();

    let similar_images = (1..=8)
        .map(|i| SimilarImage {
            url: format!("https://example{i}.com/image.jpg"),
            similarity: format!("{}%", rng.random_range(70..=95)),
            source: format!("website{i}.com"),
        })
        .collect();

    ReverseSearchReport {
        engines,
        similar_images,
        total_matches: rng.random_range(50..=200),
    }
}

fn build_reverse_search(image_url: &str) -> ReverseSearchReport {
    let mut rng = rand::rng();
    let encoded = urlencoding::encode(image_url);

    let engines: Vec<EngineMatch> = [
        (
            "Google Images",
            20,
            80,
            format!("https://images.google.com/search?tbs=sbi:url={encoded}"),
        ),
        ("TinEye", 5, 30, format!("https://tineye.com/search?url={encoded}")),
        (
            "Yandex Images",
            10,
            50,
            format!("https://yandex.com/images/search?rpt=imageview&url={encoded}"),
        ),
    ]
    .into_iter()
    .map(|(engine, low, high, url)| EngineMatch {
        engine: engine.to_string(),
        matches: rng.random_range(low..=high),
        url,
    })
    .collect();

    let total_matches = engines.iter().map(|e| e.matches).sum();

    ReverseSearchReport {
        engines,
        similar_images: Vec::new(),
        total_matches,
    }
}

fn build_metadata() -> ImageMetadata {
    let mut rng = rand::rng();

    let or_missing = |present: bool, value: String, missing: &str| {
        if present { value } else { missing.to_string() }
    };

    ImageMetadata {
        basic: BasicMetadata {
            filename: "uploaded_image.jpg".to_string(),
            filesize: "2.4 MB".to_string(),
            format: "JPEG".to_string(),
            dimensions: "1920x1080".to_string(),
            color_space: Some("sRGB".to_string()),
            compression: Some("JPEG (Quality: 85%)".to_string()),
            created: None,
        },
        camera: CameraMetadata {
            make: pick(&mut rng, &["Canon", "Nikon", "Sony", "Apple"]),
            model: pick(
                &mut rng,
                &["EOS 5D Mark IV", "D850", "A7R III", "iPhone 13 Pro"],
            ),
            lens: "EF 24-70mm f/2.8L II USM".to_string(),
            focal_length: format!("{}mm", rng.random_range(24..=200)),
            aperture: format!("f/{}", pick(&mut rng, &["2.8", "4.0", "5.6", "8.0"])),
            shutter_speed: format!("1/{}s", rng.random_range(60..=500)),
            iso: pick(&mut rng, &["100", "200", "400", "800", "1600"]),
            flash: pick(&mut rng, &["No Flash", "Flash Fired", "Auto Flash"]),
        },
        location: LocationMetadata {
            gps_coordinates: or_missing(
                rng.random_bool(0.5),
                "40.7128° N, 74.0060° W".to_string(),
                "Not available",
            ),
            location: or_missing(
                rng.random_bool(0.5),
                "New York, NY, USA".to_string(),
                "Location data removed",
            ),
            altitude: or_missing(
                rng.random_bool(0.5),
                format!("{}m above sea level", rng.random_range(1..=100)),
                "Not available",
            ),
        },
        timestamp: Timestamps {
            created: "2024-01-15 14:30:22".to_string(),
            modified: "2024-01-15 14:35:10".to_string(),
        },
    }
}

fn build_extracted_metadata(filename: Option<&str>) -> ExtractedMetadata {
    let mut rng = rand::rng();

    ExtractedMetadata {
        basic: BasicMetadata {
            filename: filename.unwrap_or("unknown.jpg").to_string(),
            filesize: "2.4 MB".to_string(),
            format: "JPEG".to_string(),
            dimensions: "1920x1080".to_string(),
            color_space: None,
            compression: None,
            created: Some("2024-01-15 14:30:22".to_string()),
        },
        camera: ExtractedCamera {
            make: "Canon".to_string(),
            model: "EOS 5D Mark IV".to_string(),
            software: "Adobe Photoshop 2024".to_string(),
        },
        location: ExtractedLocation {
            gps: rng
                .random_bool(0.5)
                .then(|| "40.7128° N, 74.0060° W".to_string()),
            location: rng.random_bool(0.5).then(|| "New York, NY".to_string()),
        },
    }
}

fn build_faces() -> FaceReport {
    let mut rng = rand::rng();
    let count = rng.random_range(0..=3);

    let faces = (1..=count)
        .map(|i| Face {
            id: format!("face_{i}"),
            confidence: rng.random_range(70..=95),
            age: rng.random_range(20..=60),
            gender: pick(&mut rng, &["Male", "Female"]),
            emotion: pick(&mut rng, &["Happy", "Neutral", "Surprised", "Sad"]),
            position: bounding_box(&mut rng, 100, 100, 200),
            features: FaceFeatures {
                eye_color: pick(&mut rng, &["Brown", "Blue", "Green", "Hazel"]),
                hair_color: pick(&mut rng, &["Black", "Brown", "Blonde", "Red"]),
                glasses: rng.random_bool(0.3),
                beard: rng.random_bool(0.4),
            },
        })
        .collect();

    FaceReport {
        total_faces: count,
        faces,
        processing_time: processing_time(&mut rng, 1000, 4000),
    }
}

fn build_objects() -> ObjectReport {
    let mut rng = rand::rng();
    let count = rng.random_range(3..=8);

    let objects: Vec<DetectedObject> = (1..=count)
        .map(|i| DetectedObject {
            id: format!("object_{i}"),
            kind: pick(&mut rng, OBJECT_TYPES),
            confidence: rng.random_range(60..=95),
            position: bounding_box(&mut rng, 50, 100, 300),
            color: pick(&mut rng, COLORS),
        })
        .collect();

    let mut categories: Vec<String> = Vec::new();
    for object in &objects {
        if !categories.contains(&object.kind) {
            categories.push(object.kind.clone());
        }
    }

    ObjectReport {
        total_objects: count,
        objects,
        categories,
        processing_time: processing_time(&mut rng, 500, 2500),
    }
}

fn build_bulk_entry(index: usize, filename: Option<&str>, size: Option<&str>) -> BulkImageResult {
    let mut rng = rand::rng();

    BulkImageResult {
        filename: filename.map_or_else(|| format!("image_{}.jpg", index + 1), str::to_string),
        size: size.unwrap_or("1.2 MB").to_string(),
        reverse_search_matches: rng.random_range(10..=50),
        faces_detected: rng.random_range(0..=3),
        objects_detected: rng.random_range(2..=8),
        has_metadata: rng.random_bool(0.7),
        processing_time: processing_time(&mut rng, 1000, 3000),
        timestamp: Utc::now().to_rfc3339(),
    }
}

fn quick_matches(items: &[(&str, &str)]) -> Vec<QuickMatch> {
    items
        .iter()
        .map(|(url, similarity)| QuickMatch {
            url: (*url).to_string(),
            similarity: (*similarity).to_string(),
        })
        .collect()
}

fn build_quick_analysis(source: &str) -> QuickImageAnalysis {
    QuickImageAnalysis {
        source: source.to_string(),
        reverse_search: vec![
            QuickEngine {
                engine: "Google Images".to_string(),
                matches: 15,
                url: "https://images.google.com/search?tbs=sbi:...".to_string(),
                similar: quick_matches(&[
                    ("https://example.com/image1.jpg", "95%"),
                    ("https://example.com/image2.jpg", "87%"),
                    ("https://example.com/image3.jpg", "82%"),
                ]),
            },
            QuickEngine {
                engine: "TinEye".to_string(),
                matches: 8,
                url: "https://tineye.com/search/...".to_string(),
                similar: quick_matches(&[
                    ("https://site1.com/photo.jpg", "92%"),
                    ("https://site2.com/pic.jpg", "89%"),
                ]),
            },
        ],
        metadata: QuickMetadata {
            filename: source.to_string(),
            filesize: "2.4 MB".to_string(),
            dimensions: "1920x1080".to_string(),
            format: "JPEG".to_string(),
            camera: "Canon EOS 5D Mark IV".to_string(),
            location: "GPS coordinates removed".to_string(),
            timestamp: "2024-01-15 14:30:22".to_string(),
            software: "Adobe Photoshop 2024".to_string(),
        },
        similar_images: [94, 91, 88, 85]
            .into_iter()
            .enumerate()
            .map(|(i, confidence)| ConfidenceMatch {
                url: format!("https://example.com/similar{}.jpg", i + 1),
                confidence: format!("{confidence}%"),
            })
            .collect(),
        analysis_timestamp: Utc::now().to_rfc3339(),
    }
}

#[async_trait]
impl ImageIntel for DemoImageIntel {
    async fn analyze(&self, options: AnalysisOptions) -> Result<ImageAnalysis, ProviderError> {
        let mut data = AnalysisSections::default();

        if options.reverse_search {
            self.latency.simulate(latency::LONG).await;
            data.reverse_search = Some(build_similarity_search());
        }
        if options.metadata_extraction {
            self.latency.simulate(latency::SHORT).await;
            data.metadata = Some(build_metadata());
        }
        if options.facial_recognition {
            self.latency.simulate(latency::SLOW).await;
            data.faces = Some(build_faces());
        }
        if options.object_detection {
            self.latency.simulate(latency::LONG).await;
            data.objects = Some(build_objects());
        }

        let analysis_id = format!(
            "img_analysis_{}",
            rand::rng().random_range(100_000..=999_999)
        );

        Ok(ImageAnalysis {
            analysis_id,
            timestamp: Utc::now().to_rfc3339(),
            options,
            data,
        })
    }

    async fn reverse_search(&self, image_url: &str) -> Result<ReverseSearchReport, ProviderError> {
        self.latency.simulate(latency::LONG).await;
        Ok(build_reverse_search(image_url))
    }

    async fn extract_metadata(
        &self,
        filename: Option<&str>,
    ) -> Result<ExtractedMetadata, ProviderError> {
        self.latency.simulate(latency::SHORT).await;
        Ok(build_extracted_metadata(filename))
    }

    async fn bulk_entry(
        &self,
        index: usize,
        filename: Option<&str>,
        size: Option<&str>,
    ) -> Result<BulkImageResult, ProviderError> {
        self.latency.simulate(latency::SHORT).await;
        Ok(build_bulk_entry(index, filename, size))
    }

    async fn quick_analysis(&self, source: &str) -> Result<QuickImageAnalysis, ProviderError> {
        Ok(build_quick_analysis(source))
    }
}

// ============================================================================
// Offline
// ============================================================================

const IMAGE_PROVIDER: &str = "Reverse image search";

#[async_trait]
impl ImageIntel for Unconfigured {
    async fn analyze(&self, _options: AnalysisOptions) -> Result<ImageAnalysis, ProviderError> {
        Err(ProviderError::NotConfigured(IMAGE_PROVIDER))
    }

    async fn reverse_search(&self, _image_url: &str) -> Result<ReverseSearchReport, ProviderError> {
        Err(ProviderError::NotConfigured(IMAGE_PROVIDER))
    }

    async fn extract_metadata(
        &self,
        _filename: Option<&str>,
    ) -> Result<ExtractedMetadata, ProviderError> {
        Err(ProviderError::NotConfigured(IMAGE_PROVIDER))
    }

    async fn bulk_entry(
        &self,
        _index: usize,
        _filename: Option<&str>,
        _size: Option<&str>,
    ) -> Result<BulkImageResult, ProviderError> {
        Err(ProviderError::NotConfigured(IMAGE_PROVIDER))
    }

    async fn quick_analysis(&self, _source: &str) -> Result<QuickImageAnalysis, ProviderError> {
        Err(ProviderError::NotConfigured(IMAGE_PROVIDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options: AnalysisOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AnalysisOptions::default());

        let options: AnalysisOptions =
            serde_json::from_str(r#"{"facialRecognition": true, "reverseSearch": false}"#).unwrap();
        assert!(options.facial_recognition);
        assert!(!options.reverse_search);
        assert!(options.metadata_extraction);
    }

    #[test]
    fn test_reverse_search_encodes_url_and_totals() {
        let report = build_reverse_search("https://img.example.com/a b.jpg?x=1");
        assert_eq!(report.engines.len(), 3);
        assert!(
            report.engines[1]
                .url
                .ends_with("https%3A%2F%2Fimg.example.com%2Fa%20b.jpg%3Fx%3D1")
        );
        let sum: u32 = report.engines.iter().map(|e| e.matches).sum();
        assert_eq!(report.total_matches, sum);
    }

    #[test]
    fn test_object_categories_are_unique() {
        let report = build_objects();
        assert_eq!(report.total_objects, report.objects.len());
        let mut sorted = report.categories.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), report.categories.len());
    }

    #[test]
    fn test_bulk_entry_defaults() {
        let entry = build_bulk_entry(2, None, None);
        assert_eq!(entry.filename, "image_3.jpg");
        assert_eq!(entry.size, "1.2 MB");
    }

    #[tokio::test]
    async fn test_analyze_respects_options() {
        let intel = DemoImageIntel::new(Latency::disabled());
        let analysis = intel.analyze(AnalysisOptions::default()).await.unwrap();
        assert!(analysis.analysis_id.starts_with("img_analysis_"));
        assert!(analysis.data.reverse_search.is_some());
        assert!(analysis.data.metadata.is_some());
        assert!(analysis.data.faces.is_none());
        assert!(analysis.data.objects.is_none());

        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json["data"].get("reverseSearch").is_some());
        assert!(json["data"].get("faces").is_none());
    }
}
