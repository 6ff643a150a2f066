// crates/vidshelf-core/src/state.rs
// Pure library data: no egui, no ffmpeg, no runtime handles.
// Serializable via serde; the JSON shape is the persisted `videoList` value.
use serde::{Deserialize, Serialize};

/// One imported video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Creation timestamp in millis (plus a `-n` suffix on collision).
    pub id:       String,
    /// Playable locator: app-owned file path on native, original locator on web.
    pub uri:      String,
    pub name:     String,
    /// Seconds. 0 when the picker did not report one.
    pub duration: f64,
    /// Browser-only alternate locator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_uri:  Option<String>,
}

impl VideoRecord {
    /// The locator handed to the video widget.
    pub fn playable_uri(&self) -> &str {
        self.web_uri.as_deref().unwrap_or(&self.uri)
    }
}

/// Ordered list of records, in import order.
/// Serializes as a bare JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoLibrary {
    records: Vec<VideoRecord>,
}

impl VideoLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VideoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn push(&mut self, record: VideoRecord) {
        self.records.push(record);
    }

    /// Remove the record with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<VideoRecord> {
        let idx = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(idx))
    }

    /// Empty the library, handing back everything that was in it.
    pub fn take_all(&mut self) -> Vec<VideoRecord> {
        std::mem::take(&mut self.records)
    }

    /// Id for a record created at `now_ms`.
    ///
    /// Normally just the millisecond timestamp. Two imports landing in the
    /// same millisecond get `"{ms}-1"`, `"{ms}-2"`, … so ids never repeat
    /// within the list.
    pub fn next_id(&self, now_ms: u64) -> String {
        let base = now_ms.to_string();
        if !self.contains(&base) {
            return base;
        }
        (1u32..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or(base)
    }
}

impl<'a> IntoIterator for &'a VideoLibrary {
    type Item     = &'a VideoRecord;
    type IntoIter = std::slice::Iter<'a, VideoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, name: &str) -> VideoRecord {
        VideoRecord {
            id:       id.into(),
            uri:      format!("/videos/{name}"),
            name:     name.into(),
            duration: 1.0,
            web_uri:  None,
        }
    }

    #[test]
    fn json_field_names_match_persisted_shape() {
        let mut r = rec("1640995200000", "a.mp4");
        r.web_uri = Some("blob:http://localhost/x".into());
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["id"], "1640995200000");
        assert_eq!(v["webUri"], "blob:http://localhost/x");
        assert!(v.get("web_uri").is_none());
    }

    #[test]
    fn web_uri_omitted_when_absent() {
        let json = serde_json::to_string(&rec("1", "a.mp4")).unwrap();
        assert!(!json.contains("webUri"));
    }

    #[test]
    fn library_serializes_as_bare_array() {
        let lib = VideoLibrary::from_records(vec![rec("1", "a.mp4")]);
        let json = serde_json::to_string(&lib).unwrap();
        assert!(json.starts_with('['));
        let back: VideoLibrary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lib);
    }

    #[test]
    fn remove_keeps_order_of_remaining() {
        let mut lib = VideoLibrary::from_records(vec![
            rec("1", "a.mp4"), rec("2", "b.mp4"), rec("3", "c.mp4"),
        ]);
        assert_eq!(lib.remove("2").map(|r| r.name), Some("b.mp4".into()));
        let ids: Vec<_> = lib.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(lib.remove("missing").is_none());
    }

    #[test]
    fn next_id_suffixes_on_collision() {
        let mut lib = VideoLibrary::new();
        assert_eq!(lib.next_id(1000), "1000");
        lib.push(rec("1000", "a.mp4"));
        assert_eq!(lib.next_id(1000), "1000-1");
        lib.push(rec("1000-1", "b.mp4"));
        assert_eq!(lib.next_id(1000), "1000-2");
        assert_eq!(lib.next_id(1001), "1001");
    }

    #[test]
    fn playable_uri_prefers_web_uri() {
        let mut r = rec("1", "a.mp4");
        assert_eq!(r.playable_uri(), "/videos/a.mp4");
        r.web_uri = Some("blob:x".into());
        assert_eq!(r.playable_uri(), "blob:x");
    }
}
