//! Persistence operations
//!
//! [`Datastore`] is the persistence contract the seeder drives;
//! [`PgDatastore`] implements it over the application schema with runtime
//! sqlx queries. The schema is owned by the main product and assumed to
//! exist.

use std::future::Future;

use sqlx::PgPool;
use uuid::Uuid;

use parlor_shared::{
    BillingPlan, Channel, Customer, LicenseLedgerEntry, NewBillingPlan, NewCustomer,
    NewLicenseLedgerEntry, NewRealm, NewRealmUser, NewRemoteServer, Realm, RealmUser, RemoteServer,
};

use crate::error::{BillingError, BillingResult};

/// Persistence operations the seeder depends on
pub trait Datastore: Send + Sync {
    fn find_realm_by_string_id(
        &self,
        string_id: &str,
    ) -> impl Future<Output = BillingResult<Option<Realm>>> + Send;

    /// Delete a realm and everything hanging off it: users, channels,
    /// subscriptions, customer, plans, ledger entries
    fn delete_realm(&self, realm_id: Uuid) -> impl Future<Output = BillingResult<()>> + Send;

    fn create_realm(&self, realm: NewRealm) -> impl Future<Output = BillingResult<Realm>> + Send;

    fn create_user(
        &self,
        user: NewRealmUser,
    ) -> impl Future<Output = BillingResult<RealmUser>> + Send;

    /// Get or create a channel by (realm, name)
    fn ensure_channel(
        &self,
        realm_id: Uuid,
        name: &str,
    ) -> impl Future<Output = BillingResult<Channel>> + Send;

    fn subscribe_user(
        &self,
        user_id: Uuid,
        channel_id: Uuid,
    ) -> impl Future<Output = BillingResult<()>> + Send;

    fn find_customer_by_realm(
        &self,
        realm_id: Uuid,
    ) -> impl Future<Output = BillingResult<Option<Customer>>> + Send;

    fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> impl Future<Output = BillingResult<Customer>> + Send;

    fn create_billing_plan(
        &self,
        plan: NewBillingPlan,
    ) -> impl Future<Output = BillingResult<BillingPlan>> + Send;

    fn create_license_ledger_entry(
        &self,
        entry: NewLicenseLedgerEntry,
    ) -> impl Future<Output = BillingResult<LicenseLedgerEntry>> + Send;

    /// Delete every remote server registration and its billing data,
    /// returning how many registrations were removed
    fn delete_all_remote_servers(&self) -> impl Future<Output = BillingResult<u64>> + Send;

    fn create_remote_server(
        &self,
        server: NewRemoteServer,
    ) -> impl Future<Output = BillingResult<RemoteServer>> + Send;
}

/// Postgres-backed datastore
#[derive(Clone)]
pub struct PgDatastore {
    pool: PgPool,
}

impl PgDatastore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Datastore for PgDatastore {
    async fn find_realm_by_string_id(&self, string_id: &str) -> BillingResult<Option<Realm>> {
        let realm: Option<Realm> = sqlx::query_as(
            "SELECT id, string_id, name, description, plan_type, created_at
             FROM realms WHERE string_id = $1",
        )
        .bind(string_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        Ok(realm)
    }

    async fn delete_realm(&self, realm_id: Uuid) -> BillingResult<()> {
        let mut tx = self.pool.begin().await?;

        // Child rows first; the schema has no ON DELETE CASCADE here.
        sqlx::query(
            "DELETE FROM license_ledger_entries
             WHERE plan_id IN (
                 SELECT p.id FROM billing_plans p
                 JOIN customers c ON p.customer_id = c.id
                 WHERE c.realm_id = $1
             )",
        )
        .bind(realm_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM billing_plans
             WHERE customer_id IN (SELECT id FROM customers WHERE realm_id = $1)",
        )
        .bind(realm_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM customers WHERE realm_id = $1")
            .bind(realm_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM channel_subscriptions
             WHERE channel_id IN (SELECT id FROM channels WHERE realm_id = $1)",
        )
        .bind(realm_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM channels WHERE realm_id = $1")
            .bind(realm_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM realm_users WHERE realm_id = $1")
            .bind(realm_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM realms WHERE id = $1")
            .bind(realm_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(realm_id = %realm_id, "Deleted realm and its billing data");

        Ok(())
    }

    async fn create_realm(&self, realm: NewRealm) -> BillingResult<Realm> {
        let created: Realm = sqlx::query_as(
            "INSERT INTO realms (id, string_id, name, description, plan_type, created_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             RETURNING id, string_id, name, description, plan_type, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&realm.string_id)
        .bind(&realm.name)
        .bind(&realm.description)
        .bind(realm.plan_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        tracing::info!(
            realm = %created.string_id,
            plan_type = %created.plan_type,
            "Created realm"
        );

        Ok(created)
    }

    async fn create_user(&self, user: NewRealmUser) -> BillingResult<RealmUser> {
        let created: RealmUser = sqlx::query_as(
            "INSERT INTO realm_users (id, realm_id, email, full_name, role, created_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             RETURNING id, realm_id, email, full_name, role, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user.realm_id)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        tracing::debug!(user = %created.email, realm_id = %created.realm_id, "Created user");

        Ok(created)
    }

    async fn ensure_channel(&self, realm_id: Uuid, name: &str) -> BillingResult<Channel> {
        let existing: Option<Channel> = sqlx::query_as(
            "SELECT id, realm_id, name, created_at
             FROM channels WHERE realm_id = $1 AND name = $2",
        )
        .bind(realm_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        if let Some(channel) = existing {
            return Ok(channel);
        }

        let created: Channel = sqlx::query_as(
            "INSERT INTO channels (id, realm_id, name, created_at)
             VALUES ($1, $2, $3, NOW())
             RETURNING id, realm_id, name, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(realm_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        tracing::debug!(channel = %created.name, realm_id = %realm_id, "Created channel");

        Ok(created)
    }

    async fn subscribe_user(&self, user_id: Uuid, channel_id: Uuid) -> BillingResult<()> {
        sqlx::query(
            "INSERT INTO channel_subscriptions (user_id, channel_id, created_at)
             VALUES ($1, $2, NOW())",
        )
        .bind(user_id)
        .bind(channel_id)
        .execute(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_customer_by_realm(&self, realm_id: Uuid) -> BillingResult<Option<Customer>> {
        let customer: Option<Customer> = sqlx::query_as(
            "SELECT id, realm_id, remote_server_id, stripe_customer_id, sponsorship_pending, created_at
             FROM customers WHERE realm_id = $1",
        )
        .bind(realm_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        Ok(customer)
    }

    async fn create_customer(&self, customer: NewCustomer) -> BillingResult<Customer> {
        let created: Customer = sqlx::query_as(
            "INSERT INTO customers (id, realm_id, remote_server_id, stripe_customer_id, sponsorship_pending, created_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             RETURNING id, realm_id, remote_server_id, stripe_customer_id, sponsorship_pending, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(customer.realm_id)
        .bind(customer.remote_server_id)
        .bind(&customer.stripe_customer_id)
        .bind(customer.sponsorship_pending)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        Ok(created)
    }

    async fn create_billing_plan(&self, plan: NewBillingPlan) -> BillingResult<BillingPlan> {
        let created: BillingPlan = sqlx::query_as(
            "INSERT INTO billing_plans (id, customer_id, tier, billing_schedule, status,
                 billing_cycle_anchor, next_invoice_date, end_date, price_per_license,
                 automanage_licenses, charge_automatically, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
             RETURNING id, customer_id, tier, billing_schedule, status, billing_cycle_anchor,
                 next_invoice_date, end_date, price_per_license, automanage_licenses,
                 charge_automatically, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(plan.customer_id)
        .bind(plan.tier)
        .bind(plan.billing_schedule)
        .bind(plan.status)
        .bind(plan.billing_cycle_anchor)
        .bind(plan.next_invoice_date)
        .bind(plan.end_date)
        .bind(plan.price_per_license)
        .bind(plan.automanage_licenses)
        .bind(plan.charge_automatically)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        tracing::info!(
            customer_id = %created.customer_id,
            tier = %created.tier,
            status = %created.status,
            "Created billing plan"
        );

        Ok(created)
    }

    async fn create_license_ledger_entry(
        &self,
        entry: NewLicenseLedgerEntry,
    ) -> BillingResult<LicenseLedgerEntry> {
        let created: LicenseLedgerEntry = sqlx::query_as(
            "INSERT INTO license_ledger_entries (id, plan_id, event_time, licenses,
                 licenses_at_next_renewal, is_renewal)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, plan_id, event_time, licenses, licenses_at_next_renewal, is_renewal",
        )
        .bind(Uuid::new_v4())
        .bind(entry.plan_id)
        .bind(entry.event_time)
        .bind(entry.licenses)
        .bind(entry.licenses_at_next_renewal)
        .bind(entry.is_renewal)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        Ok(created)
    }

    async fn delete_all_remote_servers(&self) -> BillingResult<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM license_ledger_entries
             WHERE plan_id IN (
                 SELECT p.id FROM billing_plans p
                 JOIN customers c ON p.customer_id = c.id
                 WHERE c.remote_server_id IS NOT NULL
             )",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM billing_plans
             WHERE customer_id IN (SELECT id FROM customers WHERE remote_server_id IS NOT NULL)",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM customers WHERE remote_server_id IS NOT NULL")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM remote_servers")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let count = result.rows_affected();
        tracing::info!(count, "Cleared remote server registrations");

        Ok(count)
    }

    async fn create_remote_server(&self, server: NewRemoteServer) -> BillingResult<RemoteServer> {
        let created: RemoteServer = sqlx::query_as(
            "INSERT INTO remote_servers (id, api_key, hostname, contact_email, plan_type, created_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             RETURNING id, api_key, hostname, contact_email, plan_type, created_at",
        )
        .bind(server.id)
        .bind(&server.api_key)
        .bind(&server.hostname)
        .bind(&server.contact_email)
        .bind(server.plan_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BillingError::Database(e.to_string()))?;

        tracing::info!(
            server_id = %created.id,
            hostname = %created.hostname,
            "Registered remote server"
        );

        Ok(created)
    }
}
