//! The authored $401 identity tree shown on the home page.

use glam::Vec3;

use crate::components::id_graph::{GraphNode, NodeDetail};

const GREEN: &str = "#22c55e";
const AMBER: &str = "#f59e0b";
const ZINC: &str = "#a1a1aa";
const YELLOW: &str = "#eab308";
const PURPLE: &str = "#a855f7";
const PALE_GREEN: &str = "#86efac";

#[allow(clippy::too_many_arguments)]
fn node(
	id: &str,
	label: &str,
	sublabel: &str,
	color: &str,
	icon: &str,
	anchor: [f32; 3],
	parent: Option<&str>,
	title: &str,
	body: &[&str],
) -> GraphNode {
	GraphNode {
		id: id.into(),
		label: label.into(),
		sublabel: sublabel.into(),
		color: color.into(),
		icon: icon.into(),
		anchor: Vec3::from_array(anchor),
		parent: parent.map(Into::into),
		detail: NodeDetail {
			title: title.into(),
			body: body.iter().map(|p| p.to_string()).collect(),
		},
	}
}

/// Root key, key operations, strands with their attestors, and the economic layer.
pub fn identity_tree() -> Vec<GraphNode> {
	vec![
		node(
			"root",
			"ROOT KEY",
			"self-signed",
			GREEN,
			"◈",
			[0.0, 0.0, 0.0],
			None,
			"Root Key — The Anchor",
			&[
				"Your BSV private key. Created at bit-sign.online or any BSV wallet. This is the cryptographic anchor of your entire identity.",
				"The root key signs everything: strands, attestations, key rotations. Whoever holds this key IS the identity.",
				"Self-signed means you created it, you control it, no service was involved. This is the strongest form of digital identity.",
			],
		),
		node(
			"key-rotate",
			"ROTATE",
			"key op",
			PALE_GREEN,
			"↻",
			[-2.6, -0.6, -1.4],
			Some("root"),
			"Key Rotation",
			&[
				"Delegate your identity to a new key. The old key signs the handover transaction, proving continuity.",
				"Key rotation is essential for security — if your key is compromised, rotate to a new one without losing your identity.",
				"The rotation is inscribed on-chain: old key signs \"I delegate to new key\". New key inherits all strands and attestations.",
			],
		),
		node(
			"key-revoke",
			"REVOKE",
			"key op",
			PALE_GREEN,
			"✕",
			[2.6, -0.6, -1.4],
			Some("root"),
			"Key Revocation",
			&[
				"Nuclear option — invalidate the root key entirely. All strands and attestations become orphaned.",
				"Use only in emergencies: key definitely compromised, no recovery possible.",
				"Revocation is permanent and irreversible. You would need to create a completely new identity tree.",
			],
		),
		node(
			"github",
			"STRAND",
			"GitHub",
			AMBER,
			"⎇",
			[-3.9, 3.0, 2.25],
			Some("root"),
			"GitHub Strand",
			&[
				"Proves you controlled a GitHub account at a point in time. The strand inscribes: provider (github), handle, SHA-256 of the OAuth token, and a timestamp.",
				"Once inscribed on-chain, it's permanent. Even if you lose access to the GitHub account later, the strand proves you had it.",
				"Multiple attestors can sign the same strand to increase confidence.",
			],
		),
		node(
			"twitter",
			"STRAND",
			"Twitter",
			AMBER,
			"⎇",
			[0.0, 3.0, -4.5],
			Some("root"),
			"Twitter Strand",
			&[
				"Proves you controlled a Twitter/X account at a point in time. Same inscription pattern: provider, handle, OAuth hash, timestamp.",
				"Twitter strands are especially powerful for reputation — your follower graph becomes a verifiable part of your identity.",
				"The strand is permanent even if Twitter changes its API or bans your account.",
			],
		),
		node(
			"google",
			"STRAND",
			"Google",
			AMBER,
			"⎇",
			[3.9, 3.0, 2.25],
			Some("root"),
			"Google Strand",
			&[
				"Proves you controlled a Google account (email) at a point in time. Useful for professional identity — links to your workspace, calendar, drive.",
				"Google strands can reference specific permissions you had: admin access, org membership, workspace domain.",
				"Like all strands, it's a snapshot — the proof exists even if Google revokes the OAuth token later.",
			],
		),
		node(
			"att-b0ase",
			"b0ase.com",
			"service",
			ZINC,
			"✓",
			[-5.04, 5.5, 4.86],
			Some("github"),
			"Service Attestor: b0ase.com",
			&[
				"b0ase.com acts as an attestation service — it verifies you completed the OAuth flow and signs the strand with its own key.",
				"This is NOT self-sovereign. b0ase is a trusted third party here. The strand is real, but the signature comes from b0ase's key, not yours.",
				"Stronger: get multiple attestors. Even stronger: self-sign with your own root key (true self-sovereignty).",
			],
		),
		node(
			"att-self-gh",
			"self",
			"attestor",
			GREEN,
			"✎",
			[-6.73, 5.5, 1.93],
			Some("github"),
			"Self Attestor",
			&[
				"You sign the strand yourself with your root key. No service involved. This is the strongest form of attestation.",
				"Self-attestation means: \"I personally verified this OAuth flow and I sign it with the same key that anchors my identity.\"",
				"Combined with a service attestor, you get both: third-party verification AND personal commitment.",
			],
		),
		node(
			"att-x",
			"x.com",
			"service",
			ZINC,
			"✓",
			[-1.69, 5.5, -6.79],
			Some("twitter"),
			"Service Attestor: x.com",
			&[
				"Twitter/X itself could attest your strand — confirming you completed their OAuth flow.",
				"Currently b0ase.com acts as the intermediary. In the future, any OAuth provider could sign strands directly.",
				"The more attestors on a strand, the higher the confidence level.",
			],
		),
		node(
			"att-self-x",
			"self",
			"attestor",
			GREEN,
			"✎",
			[1.69, 5.5, -6.79],
			Some("twitter"),
			"Self Attestor",
			&[
				"Self-signing your Twitter strand. You vouch for the verification with your root key.",
				"This is the gold standard — your identity, your verification, your signature.",
			],
		),
		node(
			"att-google",
			"google",
			"service",
			ZINC,
			"✓",
			[6.73, 5.5, 1.93],
			Some("google"),
			"Service Attestor: Google",
			&[
				"Google confirming your OAuth verification. Higher trust than a third-party service signing on Google's behalf.",
				"In the $401 model, any service can be an attestor. The protocol is open — attestation is not gated.",
			],
		),
		node(
			"att-self-g",
			"self",
			"attestor",
			GREEN,
			"✎",
			[5.04, 5.5, 4.86],
			Some("google"),
			"Self Attestor",
			&["Self-signing your Google strand. Combined with Google's own attestation, this creates maximum confidence."],
		),
		node(
			"economic",
			"ECONOMIC",
			"layer",
			YELLOW,
			"$",
			[0.0, -3.5, 0.0],
			Some("root"),
			"Economic Layer",
			&[
				"Your identity tree connects to the economic protocol. $402 handles payment flows, $403 handles programmable conditions.",
				"Identity enables economics: your root key has a payTo address, verified strands unlock staking and dividends, identity strength determines access levels.",
				"Without $401, you can still browse and pay. With $401, you can earn, stake, and own.",
			],
		),
		node(
			"path402",
			"$402",
			"payment paths",
			YELLOW,
			"→",
			[-2.5, -5.5, 1.0],
			Some("economic"),
			"$402 — Payment Paths",
			&[
				"Your root key's payTo address is where revenue flows. Verified identity required for staking and dividends.",
				"Identity strength determines access: more strands = more attestors = higher trust = more economic opportunity.",
				"$402 tokens (access, content, API) all check your $401 for authorization levels.",
			],
		),
		node(
			"path403",
			"$403",
			"conditions",
			PURPLE,
			"?",
			[2.5, -5.5, 1.0],
			Some("economic"),
			"$403 — Conditions Machine",
			&[
				"Programmable rules that reference your identity graph. \"Pay only if 3+ strands verified.\" \"Unlock if GitHub attested.\" \"Premium tier if followers > 100.\"",
				"$403 is designed but not yet coded. It will be the conditional logic layer that ties identity to smart behaviour.",
				"Conditions can compose: $401 identity checks + $402 payment checks + arbitrary rules.",
			],
		),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::id_graph::{GraphModel, NodeRole};

	#[test]
	fn identity_tree_is_a_valid_graph() {
		let model = GraphModel::new(identity_tree()).unwrap();
		assert_eq!(model.len(), 15);
		assert_eq!(model.edges().len(), 14);
		assert_eq!(model.role(model.index_of("root").unwrap()), NodeRole::Root);
		assert_eq!(model.role(model.index_of("github").unwrap()), NodeRole::Category);
		assert_eq!(model.role(model.index_of("economic").unwrap()), NodeRole::Category);
		assert_eq!(model.role(model.index_of("key-rotate").unwrap()), NodeRole::Leaf);
	}

	#[test]
	fn every_node_has_detail_text() {
		for node in identity_tree() {
			assert!(!node.detail.title.is_empty(), "{}", node.id);
			assert!(!node.detail.body.is_empty(), "{}", node.id);
		}
	}
}
