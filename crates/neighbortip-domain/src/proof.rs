//! Directory records and the neighbor view derived from them

use crate::fid::Fid;
use serde::{Deserialize, Serialize};

/// A username proof as returned by the directory
///
/// Only `fid` and `owner` are required; the remaining fields default when
/// absent so that partial records still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProof {
    /// Unix timestamp of the proof
    #[serde(default)]
    pub timestamp: u64,

    /// Display name the proof attests
    #[serde(default)]
    pub name: String,

    /// Owning address
    pub owner: String,

    /// Signature over the proof
    #[serde(default)]
    pub signature: String,

    /// FID the proof belongs to
    pub fid: Fid,

    /// Proof type (e.g. `USERNAME_TYPE_FNAME`)
    #[serde(rename = "type", default)]
    pub proof_type: String,
}

/// Body of a directory lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofResponse {
    /// Proofs for the requested FID, possibly empty
    #[serde(default)]
    pub proofs: Vec<UserProof>,
}

impl ProofResponse {
    /// The neighbor for this response, if any
    ///
    /// Only the first proof is consulted; later entries are ignored.
    pub fn first_neighbor(&self) -> Option<Neighbor> {
        self.proofs.first().map(Neighbor::from)
    }
}

/// A resolved FID shown to the user and offered a tip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    /// FID from the proof
    pub fid: Fid,

    /// Address tips are sent to
    pub owner: String,

    /// Display name, when the proof carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&UserProof> for Neighbor {
    fn from(proof: &UserProof) -> Self {
        Self {
            fid: proof.fid,
            owner: proof.owner.clone(),
            name: (!proof.name.is_empty()).then(|| proof.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PROOFS: &str = r#"{
        "proofs": [
            {
                "timestamp": 1700000000,
                "name": "alice",
                "owner": "0x1111111111111111111111111111111111111111",
                "signature": "c2lnMQ==",
                "fid": 8,
                "type": "USERNAME_TYPE_FNAME"
            },
            {
                "timestamp": 1700000001,
                "name": "alice.eth",
                "owner": "0x2222222222222222222222222222222222222222",
                "signature": "c2lnMg==",
                "fid": 8,
                "type": "USERNAME_TYPE_ENS_L1"
            }
        ]
    }"#;

    #[test]
    fn test_parse_directory_payload() {
        let response: ProofResponse = serde_json::from_str(TWO_PROOFS).unwrap();
        assert_eq!(response.proofs.len(), 2);
        assert_eq!(response.proofs[1].proof_type, "USERNAME_TYPE_ENS_L1");
    }

    #[test]
    fn test_first_proof_wins() {
        let response: ProofResponse = serde_json::from_str(TWO_PROOFS).unwrap();
        let neighbor = response.first_neighbor().unwrap();

        assert_eq!(neighbor.fid.value(), 8);
        assert_eq!(neighbor.owner, "0x1111111111111111111111111111111111111111");
        assert_eq!(neighbor.name.as_deref(), Some("alice"));
    }

    #[test]
    fn test_missing_proofs_field() {
        let response: ProofResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_neighbor().is_none());
    }

    #[test]
    fn test_empty_name_is_absent() {
        let proof: UserProof =
            serde_json::from_str(r#"{"owner": "0xabc", "fid": 3, "name": ""}"#).unwrap();
        let neighbor = Neighbor::from(&proof);
        assert!(neighbor.name.is_none());
        assert_eq!(proof.timestamp, 0);
    }
}
