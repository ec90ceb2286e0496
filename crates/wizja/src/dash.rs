use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};
use url::Url;

use crate::{error::WizjaResult, format::FormatDescriptor};

// Only $RepresentationID$ and $Bandwidth$ can be substituted at the manifest
// level; $Number$ and $Time$ vary per segment and are left untouched.
//
// From https://dashif.org/docs/DASH-IF-IOP-v4.3.pdf, only the %0[width]d
// format tag is permitted in identifiers.
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(RepresentationID|Bandwidth)(?:%0(\d)d)?\$").unwrap());

fn resolve_identifiers(template: &str, representation_id: &str, bandwidth: u64) -> String {
    IDENTIFIER_REGEX
        .replace_all(template, |caps: &Captures| {
            let value = match caps.get(1).map(|m| m.as_str()) {
                Some("RepresentationID") => representation_id.to_string(),
                Some("Bandwidth") => bandwidth.to_string(),
                _ => return caps[0].to_string(),
            };

            match caps.get(2).and_then(|m| m.as_str().parse::<usize>().ok()) {
                Some(width) => format!("{value:0>width$}"),
                None => value,
            }
        })
        .to_string()
}

pub fn merge_baseurls(current: &Url, new: &str) -> WizjaResult<Url> {
    if new.starts_with("http://") || new.starts_with("https://") {
        return Ok(Url::parse(new)?);
    }

    // Keep the query of the current URL unless the BaseURL carries its own;
    // manifest URLs on load-balanced CDNs often hold auth parameters there.
    let mut merged = current.join(new)?;
    if merged.query().is_none() {
        merged.set_query(current.query());
    }
    Ok(merged)
}

fn format_note(mime_type: Option<&str>) -> &'static str {
    match mime_type {
        Some(mime_type) if mime_type.starts_with("video") => "DASH video",
        Some(mime_type) if mime_type.starts_with("audio") => "DASH audio",
        _ => "DASH stream",
    }
}

/// Parses an MPD document into one [`FormatDescriptor`] per representation.
///
/// Attributes missing on a representation are inherited from its adaptation
/// set, and `BaseURL` elements are merged level by level against
/// `manifest_url`.
pub fn parse_mpd_formats(text: &str, manifest_url: &Url) -> WizjaResult<Vec<FormatDescriptor>> {
    let mpd = dash_mpd::parse(text)?;

    let mut base_url = Cow::Borrowed(manifest_url);
    if let Some(mpd_base_url) = mpd.base_url.first() {
        base_url = Cow::Owned(merge_baseurls(&base_url, &mpd_base_url.base)?);
    }

    let mut formats = Vec::new();
    for period in &mpd.periods {
        let base_url = match period.BaseURL.first() {
            Some(period_base_url) => Cow::Owned(merge_baseurls(&base_url, &period_base_url.base)?),
            None => base_url.clone(),
        };

        for adaptation in &period.adaptations {
            let base_url = match adaptation.BaseURL.first() {
                Some(adaptation_base_url) => {
                    Cow::Owned(merge_baseurls(&base_url, &adaptation_base_url.base)?)
                }
                None => base_url.clone(),
            };

            for representation in &adaptation.representations {
                let base_url = match representation.BaseURL.first() {
                    Some(representation_base_url) => {
                        Cow::Owned(merge_baseurls(&base_url, &representation_base_url.base)?)
                    }
                    None => base_url.clone(),
                };

                let mime_type = representation
                    .mimeType
                    .as_deref()
                    .or(representation.contentType.as_deref())
                    .or(adaptation.mimeType.as_deref())
                    .or(adaptation.contentType.as_deref());

                let bandwidth = representation.bandwidth.unwrap_or(0);
                let id = representation
                    .id
                    .clone()
                    .unwrap_or_else(|| bandwidth.to_string());

                let segment_template = representation
                    .SegmentTemplate
                    .as_ref()
                    .or(adaptation.SegmentTemplate.as_ref());
                let url = match segment_template.and_then(|template| template.media.as_deref()) {
                    Some(media) => {
                        merge_baseurls(&base_url, &resolve_identifiers(media, &id, bandwidth))?
                    }
                    None => base_url.as_ref().clone(),
                };

                formats.push(FormatDescriptor {
                    id,
                    url: url.to_string(),
                    note: Some(format_note(mime_type).to_string()),
                    source_preference: 0,
                    width: representation.width,
                    height: representation.height,
                    bandwidth: representation.bandwidth,
                    codecs: representation
                        .codecs
                        .clone()
                        .or_else(|| adaptation.codecs.clone()),
                    mime_type: mime_type.map(|mime_type| mime_type.to_string()),
                    frame_rate: representation
                        .frameRate
                        .clone()
                        .or_else(|| adaptation.frameRate.clone()),
                    language: representation.lang.clone().or_else(|| adaptation.lang.clone()),
                });
            }
        }
    }

    Ok(formats)
}
