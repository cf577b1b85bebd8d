//! Shared reconciliation pipeline.
//!
//! Every adapter funnels its fetched inventory through [`reconcile`]:
//! find-or-create the vendor-owned company row, upsert each entry against
//! the `(name, vendor)` key, and persist the whole batch in one write.

use chrono::{DateTime, Utc};
use core_licenses::{Company, License};
use tracing::debug;

use crate::adapter::{SyncResult, VendorContext};
use crate::error::Result;

/// Static facts about a vendor, shared by its sync and reconcile steps.
pub(crate) struct VendorProfile {
    pub vendor: &'static str,
    pub vault_reference: &'static str,
    pub category: &'static str,
    /// Re-derive `has_license` from the seat count on update. Most vendors
    /// keep a row active once it exists; Microsoft and Adobe report
    /// assigned counts that can drop to zero.
    pub seat_driven_has_license: bool,
}

/// One license/product entry as fetched from a vendor API.
pub(crate) struct FetchedLicense {
    pub name: String,
    pub seats: i64,
    /// Expiry where the vendor reports one (GitLab); `None` means an
    /// ongoing subscription and leaves any stored end date alone.
    pub expires_at: Option<DateTime<Utc>>,
}

impl FetchedLicense {
    pub fn new(name: impl Into<String>, seats: i64) -> Self {
        Self {
            name: name.into(),
            seats,
            expires_at: None,
        }
    }
}

/// Upsert fetched entries against the store, counting adds and updates
/// into `result`. All row writes happen in a single batched transaction
/// after the lookup loop.
pub(crate) async fn reconcile(
    ctx: &VendorContext,
    profile: &VendorProfile,
    fetched: Vec<FetchedLicense>,
    result: &mut SyncResult,
) -> Result<()> {
    let company = match ctx.companies.find_by_name(profile.vendor).await? {
        Some(company) => company,
        None => {
            let company =
                Company::new(profile.vendor).with_vault_reference(profile.vault_reference);
            ctx.companies.insert(&company).await?;
            debug!(vendor = profile.vendor, "Created vendor company record");
            company
        }
    };

    let now = Utc::now();
    let mut batch = Vec::with_capacity(fetched.len());

    for entry in fetched {
        match ctx
            .licenses
            .find_by_name_and_vendor(&entry.name, profile.vendor)
            .await?
        {
            Some(mut existing) => {
                existing.users = Some(entry.seats);
                if profile.seat_driven_has_license {
                    existing.has_license = entry.seats > 0;
                }
                if entry.expires_at.is_some() {
                    existing.end_date = entry.expires_at;
                }
                existing.updated_at = now;
                batch.push(existing);
                result.licenses_updated += 1;
            }
            None => {
                let mut license = License::new(entry.name, profile.vendor, profile.category);
                license.company_id = Some(company.id);
                license.has_license = true;
                license.users = Some(entry.seats);
                license.start_date = Some(now);
                license.end_date = entry.expires_at;
                batch.push(license);
                result.licenses_added += 1;
            }
        }
    }

    ctx.licenses.upsert_batch(&batch).await?;

    debug!(
        vendor = profile.vendor,
        added = result.licenses_added,
        updated = result.licenses_updated,
        "Reconciled vendor licenses"
    );

    Ok(())
}
