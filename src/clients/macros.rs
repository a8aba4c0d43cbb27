/// Generate client methods with oneshot channel boilerplate and automatic tracing.
/// Transport failures map to the error type's `ActorCommunicationError`.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

/// Generate a typed wrapper over `ResourceClient<$entity>`:
/// `new`, `create_*`, `get_*`, `list_*s` and `count_*s`.
macro_rules! impl_resource_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                pub fn new(inner: crate::actor_framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self, params))]
                pub async fn [<create_ $entity_name_snake>](
                    &self,
                    params: <$entity as crate::actor_framework::Entity>::CreateParams,
                ) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner.create(params).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: <$entity as crate::actor_framework::Entity>::Id,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list().await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<count_ $entity_name_snake s>](&self) -> Result<usize, $error> {
                    tracing::debug!("Sending request");
                    self.inner.count().await.map_err(<$error>::from)
                }
            }
        }
    };
}
