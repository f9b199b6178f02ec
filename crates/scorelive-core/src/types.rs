//! Data transfer objects for the Scoreboard Live API.
//!
//! Field names mirror the server's JSON. Numeric fields are coerced from
//! quoted strings where the server sends them that way, and timestamps
//! are parsed from the server's string formats (see [`crate::wire`]).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::codes::{Category, ScoreSystem, Special, TournamentType};
use crate::wire;

/// Credentials identifying one registered device to the server.
///
/// Issued by a successful device registration, consumed by every
/// authenticated call, and discarded when the server reports it as no
/// longer valid. The client secret is the HMAC key and must never be
/// logged; `Debug` redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCredential {
    /// Code identifying this device, prefixed to every signature.
    #[serde(rename = "activationCode")]
    pub device_code: String,

    /// Shared HMAC-SHA256 key. Never logged.
    #[serde(rename = "clientToken")]
    pub client_secret: String,

    /// Token the server uses to identify itself in pushed messages.
    #[serde(rename = "serverToken")]
    pub server_token: String,

    /// The unit this device is registered with. Identity key within a
    /// store domain.
    #[serde(rename = "unit", deserialize_with = "wire::u32_lenient")]
    pub unit_id: u32,

    /// When the credential expires on the server.
    #[serde(
        rename = "expiresAt",
        deserialize_with = "wire::datetime",
        serialize_with = "wire::ser_datetime"
    )]
    pub expires_at: NaiveDateTime,
}

impl fmt::Debug for DeviceCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCredential")
            .field("device_code", &self.device_code)
            .field("client_secret", &"<redacted>")
            .field("server_token", &self.server_token)
            .field("unit_id", &self.unit_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl fmt::Display for DeviceCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "device {} for unit {} expires at {}",
            self.device_code, self.unit_id, self.expires_at
        )
    }
}

/// A unit (club or organisation) hosted on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "unitid", deserialize_with = "wire::u32_lenient")]
    pub unit_id: u32,

    #[serde(default)]
    pub name: String,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (unit {})", self.name, self.unit_id)
    }
}

/// A tournament hosted by a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(rename = "tournamentid", deserialize_with = "wire::u32_lenient")]
    pub tournament_id: u32,

    #[serde(
        rename = "parenttournamentid",
        default,
        deserialize_with = "wire::opt_u32_lenient"
    )]
    pub parent_tournament_id: Option<u32>,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub tournament_type: TournamentType,

    /// Home team, for series ties.
    #[serde(default)]
    pub team1: Option<String>,

    /// Away team, for series ties.
    #[serde(default)]
    pub team2: Option<String>,

    #[serde(
        rename = "startdate",
        default,
        deserialize_with = "wire::opt_date",
        serialize_with = "wire::ser_opt_date"
    )]
    pub start_date: Option<NaiveDate>,

    #[serde(
        rename = "enddate",
        default,
        deserialize_with = "wire::opt_date",
        serialize_with = "wire::ser_opt_date"
    )]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: String,

    #[serde(rename = "scoresystem", default)]
    pub score_system: Option<ScoreSystem>,
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tournament_type, &self.team1, &self.team2) {
            (TournamentType::Series, Some(t1), Some(t2)) => {
                write!(f, "{} {} - {}", self.name, t1, t2)?
            }
            _ => write!(f, "{}", self.name)?,
        }
        if let Some(start) = self.start_date {
            write!(f, " ({start})")?;
        }
        Ok(())
    }
}

/// One player slot in a match: display name plus club/team affiliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRef<'a> {
    pub name: Option<&'a str>,
    pub team: Option<&'a str>,
}

/// A match, including the extended on-court fields the server returns
/// for live and finished matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "matchid", default, deserialize_with = "wire::opt_u32_lenient")]
    pub match_id: Option<u32>,

    /// Match number within the tournament.
    #[serde(
        rename = "sequencenumber",
        default,
        deserialize_with = "wire::opt_u32_lenient"
    )]
    pub sequence_number: Option<u32>,

    #[serde(rename = "team1player1name", default)]
    pub team1_player1_name: Option<String>,
    #[serde(rename = "team1player1team", default)]
    pub team1_player1_team: Option<String>,
    #[serde(rename = "team1player2name", default)]
    pub team1_player2_name: Option<String>,
    #[serde(rename = "team1player2team", default)]
    pub team1_player2_team: Option<String>,
    #[serde(rename = "team2player1name", default)]
    pub team2_player1_name: Option<String>,
    #[serde(rename = "team2player1team", default)]
    pub team2_player1_team: Option<String>,
    #[serde(rename = "team2player2name", default)]
    pub team2_player2_name: Option<String>,
    #[serde(rename = "team2player2team", default)]
    pub team2_player2_team: Option<String>,

    #[serde(default)]
    pub status: String,

    pub category: Category,

    #[serde(
        rename = "starttime",
        default,
        deserialize_with = "wire::opt_datetime",
        serialize_with = "wire::ser_opt_datetime"
    )]
    pub start_time: Option<NaiveDateTime>,

    // Extended fields, present on matches the server has placed in a
    // tournament context.
    #[serde(
        rename = "tournamentid",
        default,
        deserialize_with = "wire::opt_u32_lenient"
    )]
    pub tournament_id: Option<u32>,

    #[serde(rename = "classid", default, deserialize_with = "wire::opt_u32_lenient")]
    pub class_id: Option<u32>,

    #[serde(rename = "classdescription", default)]
    pub class_description: Option<String>,

    #[serde(rename = "scoresystem", default)]
    pub score_system: Option<ScoreSystem>,

    #[serde(
        rename = "team1player1id",
        default,
        deserialize_with = "wire::opt_u32_lenient"
    )]
    pub team1_player1_id: Option<u32>,
    #[serde(
        rename = "team1player2id",
        default,
        deserialize_with = "wire::opt_u32_lenient"
    )]
    pub team1_player2_id: Option<u32>,
    #[serde(
        rename = "team2player1id",
        default,
        deserialize_with = "wire::opt_u32_lenient"
    )]
    pub team2_player1_id: Option<u32>,
    #[serde(
        rename = "team2player2id",
        default,
        deserialize_with = "wire::opt_u32_lenient"
    )]
    pub team2_player2_id: Option<u32>,

    #[serde(rename = "team1set1", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team1_set1: Option<u32>,
    #[serde(rename = "team1set2", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team1_set2: Option<u32>,
    #[serde(rename = "team1set3", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team1_set3: Option<u32>,
    #[serde(rename = "team1set4", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team1_set4: Option<u32>,
    #[serde(rename = "team1set5", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team1_set5: Option<u32>,
    #[serde(rename = "team2set1", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team2_set1: Option<u32>,
    #[serde(rename = "team2set2", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team2_set2: Option<u32>,
    #[serde(rename = "team2set3", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team2_set3: Option<u32>,
    #[serde(rename = "team2set4", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team2_set4: Option<u32>,
    #[serde(rename = "team2set5", default, deserialize_with = "wire::opt_u32_lenient")]
    pub team2_set5: Option<u32>,

    /// Which team currently serves (1 or 2).
    #[serde(default, deserialize_with = "wire::opt_u32_lenient")]
    pub server: Option<u32>,

    #[serde(rename = "ballcount", default, deserialize_with = "wire::opt_u32_lenient")]
    pub ball_count: Option<u32>,

    #[serde(
        rename = "serversequence",
        default,
        deserialize_with = "wire::opt_u32_lenient"
    )]
    pub server_sequence: Option<u32>,

    #[serde(default)]
    pub special: Special,

    /// Server-side content tag, when assigned.
    #[serde(default)]
    pub tag: Option<String>,
}

impl Match {
    /// Player slots as a numerically indexed table: `players()[team][slot]`.
    ///
    /// Slot 1 is only meaningful for doubles categories.
    pub fn players(&self) -> [[PlayerRef<'_>; 2]; 2] {
        [
            [
                PlayerRef {
                    name: self.team1_player1_name.as_deref(),
                    team: self.team1_player1_team.as_deref(),
                },
                PlayerRef {
                    name: self.team1_player2_name.as_deref(),
                    team: self.team1_player2_team.as_deref(),
                },
            ],
            [
                PlayerRef {
                    name: self.team2_player1_name.as_deref(),
                    team: self.team2_player1_team.as_deref(),
                },
                PlayerRef {
                    name: self.team2_player2_name.as_deref(),
                    team: self.team2_player2_team.as_deref(),
                },
            ],
        ]
    }

    /// Set scores as `(team1, team2)` pairs, indexed by set number.
    pub fn set_scores(&self) -> [(Option<u32>, Option<u32>); 5] {
        [
            (self.team1_set1, self.team2_set1),
            (self.team1_set2, self.team2_set2),
            (self.team1_set3, self.team2_set3),
            (self.team1_set4, self.team2_set4),
            (self.team1_set5, self.team2_set5),
        ]
    }

    /// Deterministic content tag for locating this match on the server:
    /// lowercase hex SHA-256 over the identifying fields.
    pub fn content_tag(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.category.as_str().as_bytes());
        for team in self.players() {
            for player in team {
                hasher.update(b"\n");
                hasher.update(player.name.unwrap_or("").as_bytes());
                hasher.update(b"\n");
                hasher.update(player.team.unwrap_or("").as_bytes());
            }
        }
        hasher.update(b"\n");
        if let Some(start) = &self.start_time {
            hasher.update(wire::format_datetime(start).as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Form fields describing this match when creating it on the server.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("category", self.category.as_str().to_string())];
        if let Some(seq) = self.sequence_number {
            fields.push(("sequencenumber", seq.to_string()));
        }
        if let Some(start) = &self.start_time {
            fields.push(("starttime", wire::format_datetime(start)));
        }
        let names: [(&'static str, &Option<String>); 8] = [
            ("team1player1name", &self.team1_player1_name),
            ("team1player1team", &self.team1_player1_team),
            ("team1player2name", &self.team1_player2_name),
            ("team1player2team", &self.team1_player2_team),
            ("team2player1name", &self.team2_player1_name),
            ("team2player1team", &self.team2_player1_team),
            ("team2player2name", &self.team2_player2_name),
            ("team2player2team", &self.team2_player2_team),
        ];
        for (key, value) in names {
            if let Some(value) = value {
                fields.push((key, value.clone()));
            }
        }
        fields
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category.description())?;
        if let Some(seq) = self.sequence_number {
            write!(f, " ({seq})")?;
        }
        let [[t1p1, _], [t2p1, _]] = self.players();
        write!(
            f,
            ": {} vs {}",
            t1p1.name.unwrap_or("?"),
            t2p1.name.unwrap_or("?")
        )
    }
}

/// A court in a venue, possibly with a match assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    #[serde(rename = "courtid", deserialize_with = "wire::u32_lenient")]
    pub court_id: u32,

    /// The match currently on this court.
    #[serde(rename = "gameid", default, deserialize_with = "wire::opt_u32_lenient")]
    pub match_id: Option<u32>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub venue: Option<Venue>,
}

impl fmt::Display for Court {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.venue {
            Some(venue) => write!(f, "{} ({})", self.name, venue.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A venue grouping courts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(rename = "venueid", deserialize_with = "wire::u32_lenient")]
    pub venue_id: u32,

    #[serde(default)]
    pub name: String,
}

/// A class (draw) within a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentClass {
    #[serde(rename = "classid", deserialize_with = "wire::u32_lenient")]
    pub class_id: u32,

    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "tournament", default, deserialize_with = "wire::opt_u32_lenient")]
    pub tournament_id: Option<u32>,

    #[serde(rename = "parentclass", default, deserialize_with = "wire::opt_u32_lenient")]
    pub parent_class_id: Option<u32>,

    #[serde(default, deserialize_with = "wire::opt_u32_lenient")]
    pub size: Option<u32>,

    #[serde(rename = "type", default)]
    pub class_type: Option<String>,
}

/// A progression link: the winner of a class place advances into a
/// target match slot. All ids arrive quoted on this route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "linkid", deserialize_with = "wire::u32_lenient")]
    pub link_id: u32,

    #[serde(rename = "sourceclass", deserialize_with = "wire::u32_lenient")]
    pub source_class_id: u32,

    #[serde(rename = "sourceplace", deserialize_with = "wire::u32_lenient")]
    pub source_place: u32,

    #[serde(rename = "targetmatch", deserialize_with = "wire::u32_lenient")]
    pub target_match_id: u32,

    #[serde(rename = "targetteam", default)]
    pub target_team: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_decodes_quoted_unit() {
        let json = r#"{
            "activationCode": "ABC123-01",
            "clientToken": "s3cret",
            "serverToken": "srv",
            "unit": "17",
            "expiresAt": "2026-12-31 23:59:59"
        }"#;
        let credential: DeviceCredential = serde_json::from_str(json).unwrap();
        assert_eq!(credential.unit_id, 17);
        assert_eq!(credential.device_code, "ABC123-01");
        assert_eq!(
            wire::format_datetime(&credential.expires_at),
            "2026-12-31 23:59:59"
        );
    }

    #[test]
    fn test_credential_debug_redacts_secret() {
        let credential: DeviceCredential = serde_json::from_str(
            r#"{"activationCode":"A","clientToken":"hunter2","serverToken":"s",
                "unit":1,"expiresAt":"2026-12-31 23:59:59"}"#,
        )
        .unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_match_players_indexing() {
        let json = r#"{
            "category": "md",
            "team1player1name": "A", "team1player1team": "Club A",
            "team1player2name": "B", "team1player2team": "Club B",
            "team2player1name": "C", "team2player1team": "Club C",
            "team2player2name": "D", "team2player2team": "Club D"
        }"#;
        let m: Match = serde_json::from_str(json).unwrap();
        let players = m.players();
        assert_eq!(players[0][0].name, Some("A"));
        assert_eq!(players[0][1].team, Some("Club B"));
        assert_eq!(players[1][0].name, Some("C"));
        assert_eq!(players[1][1].name, Some("D"));
    }

    #[test]
    fn test_match_absent_scores_are_none() {
        let m: Match = serde_json::from_str(r#"{"category": "ms", "team1set1": "21"}"#).unwrap();
        let scores = m.set_scores();
        assert_eq!(scores[0], (Some(21), None));
        assert_eq!(scores[1], (None, None));
    }

    #[test]
    fn test_match_content_tag_deterministic() {
        let json = r#"{
            "category": "ws",
            "team1player1name": "Anna", "team1player1team": "BMK",
            "team2player1name": "Berit", "team2player1team": "IFK",
            "starttime": "2026-08-08 10:00:00"
        }"#;
        let m1: Match = serde_json::from_str(json).unwrap();
        let m2: Match = serde_json::from_str(json).unwrap();
        assert_eq!(m1.content_tag(), m2.content_tag());
        assert_eq!(m1.content_tag().len(), 64);

        let mut other = m1.clone();
        other.team1_player1_name = Some("Annika".to_string());
        assert_ne!(m1.content_tag(), other.content_tag());
    }

    #[test]
    fn test_match_form_fields_skip_absent_players() {
        let m: Match = serde_json::from_str(
            r#"{"category": "ms", "sequencenumber": 4,
                "team1player1name": "A", "team2player1name": "B"}"#,
        )
        .unwrap();
        let fields = m.form_fields();
        assert!(fields.contains(&("category", "ms".to_string())));
        assert!(fields.contains(&("sequencenumber", "4".to_string())));
        assert!(fields.iter().all(|(k, _)| *k != "team1player2name"));
    }

    #[test]
    fn test_link_quoted_ids() {
        let json = r#"{
            "linkid": "5", "sourceclass": "12", "sourceplace": "1",
            "targetmatch": "900", "targetteam": "team1"
        }"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.link_id, 5);
        assert_eq!(link.target_match_id, 900);
    }

    #[test]
    fn test_court_without_match() {
        let court: Court = serde_json::from_str(
            r#"{"courtid": 2, "name": "Court 2", "venue": {"venueid": 1, "name": "Hall A"}}"#,
        )
        .unwrap();
        assert_eq!(court.match_id, None);
        assert_eq!(court.to_string(), "Court 2 (Hall A)");
    }
}
