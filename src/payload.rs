//! Maps a [`ContentRecord`] to the exact string payload of its QR content
//! convention (vCard 3.0, WIFI config string, mailto/tel/smsto/geo URIs,
//! iCalendar VEVENT fragment, social profile URL).

use crate::model::{Contact, ContentRecord, SocialPlatform};

/// Formats the payload for `record`.
///
/// Pure, total and deterministic: never fails, for any combination of
/// present or absent fields. Absent fields degrade to empty segments.
/// An empty return value means there is nothing to encode and the
/// encoder must not be invoked.
pub fn format(record: &ContentRecord) -> String {
    match record {
        ContentRecord::Url { url } => url.clone(),
        ContentRecord::Text { text } => text.clone(),
        ContentRecord::VCard(contact) | ContentRecord::LanyardContact(contact) => vcard(contact),
        ContentRecord::Email {
            address,
            subject,
            body,
        } => format!(
            "mailto:{address}?subject={}&body={}",
            urlencoding::encode(subject),
            urlencoding::encode(body)
        ),
        ContentRecord::Phone { phone } => format!("tel:{phone}"),
        ContentRecord::Wifi {
            ssid,
            password,
            encryption,
            hidden,
        } => {
            // The password segment is emitted even when empty (nopass
            // networks included); omitting it breaks the convention.
            format!(
                "WIFI:T:{};S:{ssid};P:{password};H:{};;",
                encryption.as_str(),
                if *hidden { "true" } else { "false" }
            )
        }
        ContentRecord::Geo {
            latitude,
            longitude,
        } => format!("geo:{latitude},{longitude}"),
        ContentRecord::Calendar {
            title,
            location,
            description,
            start_date,
            end_date,
        } => format!(
            "BEGIN:VEVENT\nSUMMARY:{title}\nLOCATION:{location}\nDESCRIPTION:{description}\nDTSTART:{start_date}\nDTEND:{end_date}\nEND:VEVENT"
        ),
        ContentRecord::Sms { phone, message } => format!("smsto:{phone}:{message}"),
        ContentRecord::Social { platform, username } => match platform {
            SocialPlatform::Twitter => format!("https://twitter.com/{username}"),
            SocialPlatform::Linkedin => format!("https://linkedin.com/in/{username}"),
            SocialPlatform::Facebook => format!("https://facebook.com/{username}"),
            SocialPlatform::Instagram => format!("https://instagram.com/{username}"),
        },
    }
}

fn vcard(c: &Contact) -> String {
    format!(
        "BEGIN:VCARD\nVERSION:3.0\nN:{last};{first};;;\nFN:{first} {last}\nORG:{org}\nTITLE:{title}\nEMAIL:{email}\nTEL:{phone}\nURL:{website}\nADR:;;{address};;;;\nEND:VCARD",
        last = c.last_name,
        first = c.first_name,
        org = c.organization,
        title = c.title,
        email = c.email,
        phone = c.phone,
        website = c.website,
        address = c.address,
    )
}
