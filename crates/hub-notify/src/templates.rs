//! Email HTML Templates

use crate::message::Notification;

const SUPPORT_FOOTER: &str = "<p>If you have any questions, please don't hesitate to contact us at support@automationhub.com</p>\n\n          <p>Best regards,<br/>The AI Automation Hub Team</p>";

/// Format minor currency units for email bodies
fn format_amount(minor_units: i64) -> String {
    format!("${}.{:02}", minor_units / 100, (minor_units % 100).abs())
}

fn wrap(body: &str) -> String {
    format!(
        r#"<html>
      <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
        <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
          {}
        </div>
      </body>
    </html>"#,
        body
    )
}

/// Render the HTML body for a notification
pub fn render(notification: &Notification) -> String {
    match notification {
        Notification::OrderConfirmation {
            order_id,
            customer_name,
            product_name,
            amount,
            date,
            download_link,
        } => {
            let download = download_link.as_ref().map_or(String::new(), |link| {
                format!(
                    r#"<p><a href="{}" style="background-color: #0066CC; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px; display: inline-block;">Download Your Product</a></p>"#,
                    link
                )
            });
            wrap(&format!(
                r#"<h2>Order Confirmation</h2>
          <p>Hi {customer_name},</p>
          <p>Thank you for your purchase! Your order has been confirmed.</p>

          <div style="background-color: #f5f5f5; padding: 20px; margin: 20px 0; border-radius: 5px;">
            <h3 style="margin-top: 0;">Order Details</h3>
            <p><strong>Order ID:</strong> {order_id}</p>
            <p><strong>Product:</strong> {product_name}</p>
            <p><strong>Amount:</strong> {amount}</p>
            <p><strong>Date:</strong> {date}</p>
          </div>

          {download}

          {SUPPORT_FOOTER}"#,
                amount = format_amount(*amount),
            ))
        }

        Notification::SubscriptionConfirmation {
            customer_name,
            product_name,
            amount,
            interval,
            next_billing_date,
        } => wrap(&format!(
            r#"<h2>Subscription Confirmed</h2>
          <p>Hi {customer_name},</p>
          <p>Your subscription has been successfully activated!</p>

          <div style="background-color: #f5f5f5; padding: 20px; margin: 20px 0; border-radius: 5px;">
            <h3 style="margin-top: 0;">Subscription Details</h3>
            <p><strong>Plan:</strong> {product_name}</p>
            <p><strong>Billing Amount:</strong> {amount}/{interval}</p>
            <p><strong>Next Billing Date:</strong> {next_billing_date}</p>
          </div>

          <p>You now have access to all premium features. Log in to your account to get started.</p>

          <p>You can manage your subscription anytime from your account settings.</p>

          {SUPPORT_FOOTER}"#,
            amount = format_amount(*amount),
        )),

        Notification::SubscriptionCancelled {
            customer_name,
            product_name,
            cancelled_date,
        } => wrap(&format!(
            r#"<h2>Subscription Cancelled</h2>
          <p>Hi {customer_name},</p>
          <p>Your subscription has been cancelled as requested.</p>

          <div style="background-color: #f5f5f5; padding: 20px; margin: 20px 0; border-radius: 5px;">
            <h3 style="margin-top: 0;">Cancellation Details</h3>
            <p><strong>Plan:</strong> {product_name}</p>
            <p><strong>Cancelled Date:</strong> {cancelled_date}</p>
          </div>

          <p>You will lose access to premium features at the end of your current billing period.</p>

          <p>If you'd like to reactivate your subscription, you can do so anytime from your account settings.</p>

          <p>We'd love to hear your feedback. If there's anything we can improve, please let us know at support@automationhub.com</p>

          <p>Best regards,<br/>The AI Automation Hub Team</p>"#,
        )),

        Notification::PaymentFailed {
            customer_name,
            amount,
            retry_date,
        } => wrap(&format!(
            r#"<h2>Payment Failed</h2>
          <p>Hi {customer_name},</p>
          <p>We were unable to process your payment. Please update your payment method to continue your subscription.</p>

          <div style="background-color: #fff3cd; padding: 20px; margin: 20px 0; border-radius: 5px; border-left: 4px solid #ffc107;">
            <h3 style="margin-top: 0;">Action Required</h3>
            <p><strong>Amount:</strong> {amount}</p>
            <p><strong>Retry Date:</strong> {retry_date}</p>
            <p>We'll automatically retry your payment on the date above. To update your payment method now, log in to your account.</p>
          </div>

          {SUPPORT_FOOTER}"#,
            amount = format_amount(*amount),
        )),
    }
}
