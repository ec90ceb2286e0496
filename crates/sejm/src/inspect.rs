use std::sync::LazyLock;

use regex::Regex;
use wizja::{dash, FormatDescriptor};
use wizja_plugin::*;

use crate::{
    client::SejmClient,
    page::{EmbedPage, TransmissionPage},
    time::parse_date_time,
};

static TRANSMISSION_URL_REGEXP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?sejm\.gov\.pl/[Ss]ejm\d+\.nsf/transmisja\.xsp\?documentId=([0-9A-F]+)")
        .unwrap()
});

/// Returns the `documentId` of a transmission page URL, or `None` when the
/// URL does not address a transmission.
pub fn transmission_id(url: &str) -> Option<&str> {
    TRANSMISSION_URL_REGEXP
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|matched| matched.as_str())
}

/// Rebuilds a scraped camera source into the manifest request URL.
///
/// The scraped value is the backslash-escaped `flv` entry of the player's
/// camera array, pointing at the raw-recording (`nvr`) endpoint. The DASH
/// manifest for the same feed lives under `livedash`, addressed by the
/// transmission's start/stop window in epoch milliseconds.
pub(crate) fn manifest_request_url(source: &str, start_ms: i64, stop_ms: i64) -> String {
    let source = source.replace('\\', "");
    let source = if source.starts_with("//") {
        format!("https:{source}")
    } else {
        source
    };
    let source = source.replacen("/nvr/", "/livedash/", 1);

    format!("{source}?indexMode=true&startTime={start_ms}&stopTime={stop_ms}")
}

fn tag_camera(mut format: FormatDescriptor, camera: usize) -> FormatDescriptor {
    format.id = format!("{camera}-{}", format.id);
    format.note = Some(match format.note.take() {
        Some(note) => format!("{note}, camera {camera}"),
        None => format!("camera {camera}"),
    });
    // the first camera is the director's cut; prefer it over the fixed ones
    format.source_preference = if camera == 0 { 1 } else { 2 };
    format
}

/// Runs the whole extraction against an already matched transmission page.
///
/// Every step is mandatory and fatal on failure: a single missing field or
/// unresolvable camera aborts the call, there is no partial result.
pub async fn extract(client: &SejmClient, url: &str, document_id: &str) -> anyhow::Result<MediaInfo> {
    let page = TransmissionPage::new(client.webpage(url).await?);
    let iframe_src = page.iframe_src()?;
    let start = page.start()?;
    let stop = page.stop()?;
    let title = page.title()?;

    let embed_url = format!("{iframe_src}VideoFrame.xsp/{document_id}");
    let embed = EmbedPage::new(client.webpage(&embed_url).await?);
    let cameras = embed.cameras()?;

    let start_ms = parse_date_time(start)?;
    let stop_ms = parse_date_time(stop)?;

    // start and stop are expected to share a date; trust the start side
    let start_date = start.split_once(' ').map(|(date, _)| date).unwrap_or(start);
    let stop_date = stop.split_once(' ').map(|(date, _)| date).unwrap_or(stop);
    if start_date != stop_date {
        log::warn!("transmission spans multiple dates: start {start}, stop {stop}");
    }

    let mut batches = Vec::with_capacity(cameras.len());
    for (camera, source) in cameras.into_iter().enumerate() {
        let request_url = manifest_request_url(source, start_ms, stop_ms);
        log::debug!("resolving camera {camera} manifest from {request_url}");

        let (manifest_url, manifest) = client.manifest(&request_url).await?;
        let formats = dash::parse_mpd_formats(&manifest, &manifest_url)?;
        batches.push(
            formats
                .into_iter()
                .map(move |format| tag_camera(format, camera)),
        );
    }

    Ok(MediaInfo {
        id: document_id.to_string(),
        title: format!("{title} - {start_date}"),
        formats: batches.into_iter().flatten().collect(),
    })
}

pub struct SejmInspector;

impl InspectorBuilder for SejmInspector {
    fn name(&self) -> String {
        "sejm".to_string()
    }

    fn help(&self) -> Vec<String> {
        [
            "Extracts Sejm transmission recordings.",
            "",
            "Template:",
            "- https://www.sejm.gov.pl/Sejm*.nsf/transmisja.xsp?documentId=*",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn build(&self, _args: &InspectorArgs) -> anyhow::Result<Box<dyn Inspect>> {
        Ok(Box::new(SejmInspectorImpl))
    }
}

struct SejmInspectorImpl;

#[async_trait]
impl Inspect for SejmInspectorImpl {
    async fn matches(&self, url: &str) -> bool {
        transmission_id(url).is_some()
    }

    async fn inspect(&self, url: &str) -> anyhow::Result<InspectResult> {
        let Some(document_id) = transmission_id(url) else {
            return Ok(InspectResult::NotMatch);
        };

        let client = SejmClient::new();
        let media = extract(&client, url, document_id).await?;
        Ok(InspectResult::Media(media))
    }
}

#[cfg(test)]
mod tests {
    use super::{manifest_request_url, tag_camera, transmission_id};
    use wizja::FormatDescriptor;

    #[test]
    fn test_transmission_id() {
        let matching = [
            (
                "https://www.sejm.gov.pl/Sejm8.nsf/transmisja.xsp?documentId=03388A8171820F02C125844600284135&symbol=STENOGRAM_TRANSMISJA",
                "03388A8171820F02C125844600284135",
            ),
            (
                "http://www.sejm.gov.pl/sejm7.nsf/transmisja.xsp?documentId=7C5F29646C5A06BEC1257E980045B068",
                "7C5F29646C5A06BEC1257E980045B068",
            ),
            (
                "http://sejm.gov.pl/sejm7.nsf/transmisja.xsp?documentId=7C5F29646C5A06BEC1257E980045B068&symbol=STENOGRAM_TRANSMISJA",
                "7C5F29646C5A06BEC1257E980045B068",
            ),
            (
                "https://www.sejm.gov.pl/Sejm9.nsf/transmisja.xsp?documentId=E9F49F20EEA47D3AC125883F002B2D60&symbol=STENOGRAM_TRANSMISJA",
                "E9F49F20EEA47D3AC125883F002B2D60",
            ),
        ];
        for (url, document_id) in matching {
            assert_eq!(transmission_id(url), Some(document_id));
        }

        // archive listing pages are a different document type
        assert_eq!(
            transmission_id(
                "https://www.sejm.gov.pl/Sejm9.nsf/transmisje_arch.xsp?unid=C9EB0FEA9A446135C1258829004720F6"
            ),
            None
        );
        assert_eq!(
            transmission_id("https://example.com/Sejm9.nsf/transmisja.xsp?documentId=ABCD"),
            None
        );
    }

    #[test]
    fn test_manifest_request_url() {
        assert_eq!(
            manifest_request_url(
                r"http:\/\/r.dcs.redcdn.pl\/nvr\/o2\/sejm\/ENC01\/live.livx",
                692621130000,
                692634600000,
            ),
            "http://r.dcs.redcdn.pl/livedash/o2/sejm/ENC01/live.livx?indexMode=true&startTime=692621130000&stopTime=692634600000"
        );

        // scheme-relative sources are upgraded to https
        assert_eq!(
            manifest_request_url(r"\/\/r.dcs.redcdn.pl\/nvr\/o2\/sejm\/ENC01\/live.livx", 0, 1),
            "https://r.dcs.redcdn.pl/livedash/o2/sejm/ENC01/live.livx?indexMode=true&startTime=0&stopTime=1"
        );
    }

    #[test]
    fn test_tag_camera() {
        let format = FormatDescriptor {
            id: "v720".to_string(),
            note: Some("DASH video".to_string()),
            ..Default::default()
        };

        let primary = tag_camera(format.clone(), 0);
        assert_eq!(primary.id, "0-v720");
        assert_eq!(primary.note.as_deref(), Some("DASH video, camera 0"));
        assert_eq!(primary.source_preference, 1);

        let secondary = tag_camera(format, 3);
        assert_eq!(secondary.id, "3-v720");
        assert_eq!(secondary.source_preference, 2);

        let unlabeled = tag_camera(FormatDescriptor::default(), 1);
        assert_eq!(unlabeled.note.as_deref(), Some("camera 1"));
    }
}
