use crate::api::ApiClient;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner, PageHeader};
use crate::pages::profile::repository::{fetch_profile, profile_fields};
use leptos::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let profile = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { fetch_profile(&api).await }
        },
    );

    view! {
        <Layout>
            <PageHeader title="My Profile" subtitle="Your account details" />
            {move || match profile.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(data)) => {
                    let fields = profile_fields(&data.profile);
                    let shifts = data.shifts;
                    view! {
                        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-6">
                            <dl class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                                {fields
                                    .into_iter()
                                    .map(|(label, value)| view! {
                                        <div>
                                            <dt class="text-sm font-medium text-fg-muted">{label}</dt>
                                            <dd class="mt-1 text-sm text-fg">{value}</dd>
                                        </div>
                                    })
                                    .collect_view()}
                            </dl>
                            {(!shifts.is_empty()).then(|| view! {
                                <div>
                                    <h3 class="text-sm font-medium text-fg-muted">"Assigned shifts"</h3>
                                    <ul class="mt-1 text-sm text-fg list-disc list-inside">
                                        {shifts.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}
                                    </ul>
                                </div>
                            })}
                        </div>
                    }
                    .into_view()
                }
            }}
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::{helpers::provide_role, ssr::render_to_string};

    #[test]
    fn renders_header_while_loading() {
        let html = render_to_string(|| {
            provide_role(Role::Employee);
            view! { <ProfilePage /> }
        });
        assert!(html.contains("My Profile"));
    }
}
