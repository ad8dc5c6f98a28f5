//! Fixture provisioning orchestrator
//!
//! [`Seeder`] walks the profile catalog and drives the three collaborator
//! seams (datastore, payment provider, cache invalidator) to build each
//! fixture: realms with an owning admin, a default channel, and billing
//! state; remote servers with generated credentials and, for the legacy
//! tier, a time-bounded plan.

use time::OffsetDateTime;
use uuid::Uuid;

use parlor_billing::{
    initial_license_ledger, legacy_plan, paid_plan, parse_timestamp, BillingError, BillingResult,
    CacheInvalidator, Datastore, LegacyPlanParams, PaidPlanParams, PaymentProvider,
};
use parlor_shared::{
    NewCustomer, NewRealm, NewRealmUser, NewRemoteServer, PlanStatus, ServerPlanType, UserRole,
};

use crate::catalog::{self, customer_profiles, CustomerProfile, ProfileKind};
use crate::report::ServerCredentials;

/// Per-seat price in cents on every paid fixture plan
const PRICE_PER_LICENSE: i64 = 1200;

/// License count recorded on each plan's initial ledger entry
const FIXTURE_LICENSES: i32 = 10;

/// Channel every fixture realm starts with
const DEFAULT_CHANNEL: &str = "all";

/// Stripe test token backing fixture cards
const CARD_TOKEN: &str = "tok_visa";

/// Email domain for fixture admin accounts
const ADMIN_EMAIL_DOMAIN: &str = "parlor.dev";

/// Run-level switches
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    /// Skip realm profiles; remote servers are always provisioned
    pub only_remote_server: bool,
}

/// Drives the full fixture provisioning flow
pub struct Seeder<S, P, C> {
    store: S,
    payments: P,
    cache: C,
}

impl<S, P, C> Seeder<S, P, C>
where
    S: Datastore,
    P: PaymentProvider,
    C: CacheInvalidator,
{
    pub fn new(store: S, payments: P, cache: C) -> Self {
        Self {
            store,
            payments,
            cache,
        }
    }

    /// Provision every catalog profile.
    ///
    /// Clears all remote server registrations and flushes the cache before
    /// any profile is processed, then walks the catalog in order. Returns
    /// the credentials of each remote server created, for the trailing
    /// report.
    pub async fn run(&self, options: &SeedOptions) -> BillingResult<Vec<ServerCredentials>> {
        let profiles = customer_profiles(OffsetDateTime::now_utc())?;

        self.store.delete_all_remote_servers().await?;
        self.cache.flush_all().await?;

        tracing::info!(profiles = profiles.len(), "Seeding billing fixtures");

        let mut credentials = Vec::new();
        for profile in &profiles {
            match profile.kind {
                ProfileKind::Realm => {
                    if options.only_remote_server {
                        continue;
                    }
                    self.populate_realm(profile).await?;
                }
                ProfileKind::RemoteServer => {
                    credentials.push(self.populate_remote_server(profile).await?);
                }
            }
        }

        Ok(credentials)
    }

    /// Provision one realm fixture: the realm row, its owning admin user,
    /// the default channel and subscription, and whatever billing state the
    /// profile calls for.
    pub async fn populate_realm(&self, profile: &CustomerProfile) -> BillingResult<()> {
        let plan_type = catalog::realm_plan_type(profile.tier, profile.is_sponsored)?;

        if let Some(existing) = self
            .store
            .find_realm_by_string_id(&profile.unique_id)
            .await?
        {
            // The deleted rows may still be cached; drop them with the realm.
            self.store.delete_realm(existing.id).await?;
            self.cache.flush_all().await?;
        }

        let realm = self
            .store
            .create_realm(NewRealm {
                string_id: profile.unique_id.clone(),
                name: profile.unique_id.clone(),
                description: profile.unique_id.clone(),
                plan_type,
            })
            .await?;

        let admin_name = format!("{}-admin", plan_type.plan_name());
        let admin = self
            .store
            .create_user(NewRealmUser {
                realm_id: realm.id,
                email: format!("{}@{}", admin_name, ADMIN_EMAIL_DOMAIN),
                full_name: admin_name,
                role: UserRole::Owner,
            })
            .await?;

        let channel = self.store.ensure_channel(realm.id, DEFAULT_CHANNEL).await?;
        self.store.subscribe_user(admin.id, channel.id).await?;

        if profile.sponsorship_pending {
            let mut customer = NewCustomer::for_realm(realm.id);
            customer.sponsorship_pending = true;
            self.store.create_customer(customer).await?;
            tracing::info!(realm = %profile.unique_id, "Provisioned realm with sponsorship pending");
            return Ok(());
        }

        let Some(tier) = profile.tier else {
            tracing::info!(realm = %profile.unique_id, plan_type = %plan_type, "Provisioned realm");
            return Ok(());
        };

        let customer = match self.store.find_customer_by_realm(realm.id).await? {
            Some(existing) => existing,
            None => {
                let stripe_customer_id = self
                    .payments
                    .create_customer(&profile.unique_id, &admin.email)
                    .await?;
                let mut record = NewCustomer::for_realm(realm.id);
                record.stripe_customer_id = Some(stripe_customer_id);
                self.store.create_customer(record).await?
            }
        };

        let stripe_customer_id = customer.stripe_customer_id.clone().ok_or_else(|| {
            BillingError::StripeApi(format!(
                "Customer for realm {} has no provider id",
                profile.unique_id
            ))
        })?;

        if !profile.card.is_empty() {
            let payment_method_id = self.payments.create_card_payment_method(CARD_TOKEN).await?;
            self.payments
                .attach_payment_method(&stripe_customer_id, &payment_method_id)
                .await?;
            self.payments
                .set_default_payment_method(&stripe_customer_id, &payment_method_id)
                .await?;
        }

        let plan = self
            .store
            .create_billing_plan(paid_plan(PaidPlanParams {
                customer_id: customer.id,
                tier,
                billing_schedule: profile.billing_schedule,
                status: profile.status,
                automanage_licenses: profile.automanage_licenses,
                charge_automatically: profile.charge_automatically,
                price_per_license: PRICE_PER_LICENSE,
                billing_cycle_anchor: OffsetDateTime::now_utc(),
            })?)
            .await?;

        self.store
            .create_license_ledger_entry(initial_license_ledger(
                plan.id,
                plan.billing_cycle_anchor,
                FIXTURE_LICENSES,
            ))
            .await?;

        tracing::info!(
            realm = %profile.unique_id,
            plan_type = %plan_type,
            tier = %tier,
            "Provisioned realm"
        );

        Ok(())
    }

    /// Provision one remote server fixture and return its credentials
    pub async fn populate_remote_server(
        &self,
        profile: &CustomerProfile,
    ) -> BillingResult<ServerCredentials> {
        let plan_type = catalog::server_plan_type(profile.tier)?;

        let server_uuid = Uuid::new_v4();
        // Fixture shortcut: the API key is the server identity itself.
        let api_key = server_uuid.to_string();

        let server = self
            .store
            .create_remote_server(NewRemoteServer {
                id: server_uuid,
                api_key,
                hostname: format!("{}.example.com", profile.unique_id),
                contact_email: format!("{}@example.com", profile.unique_id),
                plan_type,
            })
            .await?;

        match plan_type {
            ServerPlanType::SelfHosted => {
                let renewal_date = parse_timestamp(&profile.renewal_date)?;
                let end_date = parse_timestamp(&profile.end_date)?;

                let customer = self
                    .store
                    .create_customer(NewCustomer::for_remote_server(server.id))
                    .await?;
                self.store
                    .create_billing_plan(legacy_plan(LegacyPlanParams {
                        customer_id: customer.id,
                        renewal_date,
                        end_date,
                    }))
                    .await?;
            }
            ServerPlanType::Business => {
                // Business-tier server billing is not modeled yet.
                tracing::debug!(server = %profile.unique_id, "Skipping business plan setup");
            }
        }

        if profile.status == PlanStatus::SwitchPlanTierAtPlanEnd {
            // Scheduled tier switches are not modeled yet.
            tracing::debug!(server = %profile.unique_id, "Skipping scheduled tier switch setup");
        }

        tracing::info!(
            server = %profile.unique_id,
            plan_type = %plan_type,
            "Provisioned remote server"
        );

        Ok(ServerCredentials {
            unique_id: profile.unique_id.clone(),
            server_uuid: server.id,
            api_key: server.api_key,
        })
    }
}
