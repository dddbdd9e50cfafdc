//! Stripe Implementation of the Payment Provider Seam

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stripe::{
    BillingPortalSession, Charge, CheckoutSession as StripeCheckoutSession, CheckoutSessionMode,
    Client, CreateBillingPortalSession, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData, CreateCheckoutSessionLineItemsPriceDataProductData,
    CreateCheckoutSessionLineItemsPriceDataRecurring,
    CreateCheckoutSessionLineItemsPriceDataRecurringInterval,
    CreateCheckoutSessionPaymentMethodTypes, CreateCustomer, Currency, Customer, CustomerId,
    Event, ListCharges, ListSubscriptions, Subscription, SubscriptionStatusFilter, Webhook,
};

use hub_core::{AuthUser, BillingInterval};

use crate::checkout::{CheckoutIntent, CheckoutMode, CheckoutSession};
use crate::error::{PaymentError, Result};
use crate::provider::{
    CustomerIdentity, CustomerRef, PaymentProvider, PaymentRecord, PortalSession,
    SubscriptionItemSummary, SubscriptionSummary,
};

/// Stripe client wrapper
pub struct StripeProvider {
    client: Client,
    webhook_secret: String,
}

impl StripeProvider {
    /// Create a new Stripe provider
    pub fn new(secret_key: &str, webhook_secret: &str) -> Self {
        Self {
            client: Client::new(secret_key),
            webhook_secret: webhook_secret.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        let webhook_secret = std::env::var("STRIPE_WEBHOOK_SECRET")
            .map_err(|_| PaymentError::Config("STRIPE_WEBHOOK_SECRET not set".into()))?;

        Ok(Self::new(&secret_key, &webhook_secret))
    }

    fn parse_customer_id(customer_id: &str) -> Result<CustomerId> {
        customer_id
            .parse()
            .map_err(|_| PaymentError::Platform(format!("invalid customer id: {}", customer_id)))
    }

    fn parse_currency(code: &str) -> Result<Currency> {
        code.parse()
            .map_err(|_| PaymentError::Config(format!("unsupported currency code: {}", code)))
    }
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

fn subscription_summary(sub: &Subscription) -> SubscriptionSummary {
    let items = sub
        .items
        .data
        .iter()
        .map(|item| SubscriptionItemSummary {
            id: item.id.to_string(),
            price_id: item.price.as_ref().map(|price| price.id.to_string()),
            product_id: item
                .price
                .as_ref()
                .and_then(|price| price.product.as_ref())
                .map(|product| product.id().to_string()),
        })
        .collect();

    SubscriptionSummary {
        id: sub.id.to_string(),
        status: sub.status.to_string(),
        current_period_start: timestamp(sub.current_period_start),
        current_period_end: timestamp(sub.current_period_end),
        cancel_at_period_end: sub.cancel_at_period_end,
        items,
    }
}

fn payment_record(charge: &Charge) -> PaymentRecord {
    PaymentRecord {
        id: charge.id.to_string(),
        amount: charge.amount,
        currency: charge.currency.to_string(),
        status: charge.status.to_string(),
        created: timestamp(charge.created),
        description: charge.description.clone(),
        receipt_url: charge.receipt_url.clone(),
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_checkout_session(&self, intent: CheckoutIntent) -> Result<CheckoutSession> {
        let currency = Self::parse_currency(&intent.line_item.currency)?;

        let mut params = CreateCheckoutSession::new();
        params.customer_email = Some(&intent.customer_email);
        params.client_reference_id = Some(&intent.client_reference_id);
        params.success_url = Some(&intent.success_url);
        params.cancel_url = Some(&intent.cancel_url);
        params.allow_promotion_codes = Some(intent.allow_promotion_codes);
        params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);
        params.mode = Some(match intent.mode {
            CheckoutMode::Payment => CheckoutSessionMode::Payment,
            CheckoutMode::Subscription => CheckoutSessionMode::Subscription,
        });
        params.metadata = Some(intent.metadata.clone());

        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            quantity: Some(intent.line_item.quantity),
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency,
                unit_amount: Some(intent.line_item.unit_amount),
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: intent.line_item.name.clone(),
                    description: Some(intent.line_item.description.clone()),
                    ..Default::default()
                }),
                recurring: intent.line_item.recurring.map(|interval| {
                    CreateCheckoutSessionLineItemsPriceDataRecurring {
                        interval: match interval {
                            BillingInterval::Month => {
                                CreateCheckoutSessionLineItemsPriceDataRecurringInterval::Month
                            }
                            BillingInterval::Year => {
                                CreateCheckoutSessionLineItemsPriceDataRecurringInterval::Year
                            }
                        },
                        interval_count: Some(1),
                    }
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Platform(e.to_string()))?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::Platform("No checkout URL returned".into()))?;

        Ok(CheckoutSession {
            id: session.id.to_string(),
            url,
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession> {
        let customer = Self::parse_customer_id(customer_id)?;

        let mut params = CreateBillingPortalSession::new(customer);
        params.return_url = Some(return_url);

        let session = BillingPortalSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Platform(e.to_string()))?;

        Ok(PortalSession { url: session.url })
    }

    async fn get_or_create_customer(&self, user: &AuthUser) -> Result<CustomerRef> {
        if let Some(id) = &user.customer_ref {
            return Ok(CustomerRef {
                id: id.clone(),
                created: false,
            });
        }

        let mut metadata = HashMap::new();
        metadata.insert("user_id".to_string(), user.id.to_string());

        let mut params = CreateCustomer::new();
        params.email = Some(&user.email);
        let name = user.display_name();
        params.name = Some(name);
        params.metadata = Some(metadata);

        let customer = Customer::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Platform(e.to_string()))?;

        Ok(CustomerRef {
            id: customer.id.to_string(),
            created: true,
        })
    }

    async fn retrieve_customer(&self, customer_id: &str) -> Result<CustomerIdentity> {
        let id = Self::parse_customer_id(customer_id)?;

        let customer = Customer::retrieve(&self.client, &id, &[])
            .await
            .map_err(|e| PaymentError::Platform(e.to_string()))?;

        Ok(CustomerIdentity {
            email: customer.email.clone(),
            name: customer.name.clone(),
        })
    }

    async fn list_active_subscriptions(
        &self,
        customer_id: &str,
    ) -> Result<Vec<SubscriptionSummary>> {
        let mut params = ListSubscriptions::new();
        params.customer = Some(Self::parse_customer_id(customer_id)?);
        params.status = Some(SubscriptionStatusFilter::Active);
        params.limit = Some(1);

        let subscriptions = Subscription::list(&self.client, &params)
            .await
            .map_err(|e| PaymentError::Platform(e.to_string()))?;

        Ok(subscriptions.data.iter().map(subscription_summary).collect())
    }

    async fn list_charges(&self, customer_id: &str) -> Result<Vec<PaymentRecord>> {
        let mut params = ListCharges::new();
        params.customer = Some(Self::parse_customer_id(customer_id)?);
        params.limit = Some(50);

        let charges = Charge::list(&self.client, &params)
            .await
            .map_err(|e| PaymentError::Platform(e.to_string()))?;

        Ok(charges.data.iter().map(payment_record).collect())
    }

    fn verify_event(&self, payload: &str, signature: &str) -> Result<Event> {
        Webhook::construct_event(payload, signature, &self.webhook_secret)
            .map_err(|e| PaymentError::Signature(e.to_string()))
    }
}
